use std::path::{Component, Path, PathBuf};

/// Exclusive upper bound of the random component in generated filenames.
pub const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// A file part as announced by the client, before any byte is read.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub original_name: String,
    pub mime_type: String,
}

impl FilePart {
    pub fn new(field: String, original_name: String, mime_type: String) -> Self {
        Self {
            field,
            original_name,
            mime_type,
        }
    }

    /// Extension of the original name including the leading dot, or `""`.
    pub fn extension(&self) -> String {
        Path::new(&self.original_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Last path component of the original name without its extension, with
    /// each whitespace run collapsed into a single underscore. A bare `.` or
    /// `..` is kept as is.
    pub fn sanitized_base(&self) -> String {
        let path = Path::new(&self.original_name);
        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => match path.components().next_back() {
                Some(Component::CurDir) => ".".to_string(),
                Some(Component::ParentDir) => "..".to_string(),
                _ => String::new(),
            },
        };

        let mut base = String::with_capacity(stem.len());
        let mut in_whitespace = false;
        for c in stem.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    base.push('_');
                }
                in_whitespace = true;
            } else {
                base.push(c);
                in_whitespace = false;
            }
        }
        base
    }

    /// `{base}-{timestamp}-{random}{extension}`
    pub fn storage_filename(&self, timestamp_ms: i64, random: u32) -> String {
        format!(
            "{}-{}-{}{}",
            self.sanitized_base(),
            timestamp_ms,
            random,
            self.extension()
        )
    }
}

/// A file part that has been written to the storage directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub field: String,
    pub original_name: String,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub saved_path: PathBuf,
}

impl StoredFile {
    pub fn new(part: FilePart, filename: String, size: u64, saved_path: PathBuf) -> Self {
        Self {
            field: part.field,
            original_name: part.original_name,
            filename,
            mime_type: part.mime_type,
            size,
            saved_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str) -> FilePart {
        FilePart::new("image1".into(), name.into(), "image/png".into())
    }

    #[test]
    fn keeps_only_the_last_extension() {
        assert_eq!(part("photo.png").extension(), ".png");
        assert_eq!(part("archive.tar.gz").extension(), ".gz");
        assert_eq!(part("archive.tar.gz").sanitized_base(), "archive.tar");
        assert_eq!(part("README").extension(), "");
        assert_eq!(part(".hidden").extension(), "");
        assert_eq!(part(".hidden").sanitized_base(), ".hidden");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(part("my  holiday\tpic.jpg").sanitized_base(), "my_holiday_pic");
        assert_eq!(part(" lead.png").sanitized_base(), "_lead");
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(part("../../etc/passwd.png").sanitized_base(), "passwd");
        assert_eq!(part("/tmp/a b.gif").storage_filename(1, 2), "a_b-1-2.gif");
    }

    #[test]
    fn formats_storage_filename() {
        let name = part("cat photo.webp").storage_filename(1_700_000_000_123, 987_654_321);
        assert_eq!(name, "cat_photo-1700000000123-987654321.webp");

        assert_eq!(part("").storage_filename(5, 0), "-5-0");
    }

    #[test]
    fn keeps_dot_names_as_base() {
        assert_eq!(part(".").sanitized_base(), ".");
        assert_eq!(part("..").sanitized_base(), "..");
        assert_eq!(part("..").storage_filename(7, 8), "..-7-8");
        assert_eq!(part("a/..").sanitized_base(), "..");
        assert_eq!(part("/").sanitized_base(), "");
    }

    #[test]
    fn stored_file_carries_part_metadata() {
        let stored = StoredFile::new(
            part("a.png"),
            "a-1-2.png".into(),
            1024,
            PathBuf::from("/srv/uploads/a-1-2.png"),
        );
        assert_eq!(stored.field, "image1");
        assert_eq!(stored.original_name, "a.png");
        assert_eq!(stored.mime_type, "image/png");
        assert_eq!(stored.size, 1024);
    }
}
