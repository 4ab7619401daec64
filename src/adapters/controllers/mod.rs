pub mod upload_controller;
