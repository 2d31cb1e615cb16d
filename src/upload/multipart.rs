//! A single-file `multipart/form-data` body.
//!
//! The portal only needs one file field, so this writes the part header,
//! streams the file, and writes the closing boundary. The total length is
//! known up front so the request can carry a `Content-Length`.

use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

/// A multipart body carrying one file part.
#[derive(Debug)]
pub struct MultipartFile {
    boundary: String,
    head: Vec<u8>,
    file: fs::File,
    file_len: u64,
    tail: Vec<u8>,
}

impl MultipartFile {
    /// Open `path` as the content of form field `field` with a random
    /// boundary.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened or stat-ed.
    pub fn open(field: &str, path: &Path) -> io::Result<Self> {
        let boundary = format!("------------------------{}", uuid::Uuid::new_v4().simple());
        Self::open_with_boundary(field, path, boundary)
    }

    /// Like [`MultipartFile::open`], with a caller-chosen boundary.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened or stat-ed.
    pub fn open_with_boundary(field: &str, path: &Path, boundary: String) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        let file_len = file.metadata()?.len();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let head = format!(
            concat!(
                "--{boundary}\r\n",
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n",
                "Content-Type: application/octet-stream\r\n",
                "\r\n"
            ),
            boundary = boundary,
            field = field,
            file_name = file_name.replace('"', "%22"),
        )
        .into_bytes();
        let tail = format!("\r\n--{boundary}--\r\n").into_bytes();
        Ok(Self {
            boundary,
            head,
            file,
            file_len,
            tail,
        })
    }

    /// Return the `Content-Type` header value, including the boundary.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Return the exact number of bytes [`MultipartFile::into_reader`]
    /// yields.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.head.len() as u64 + self.file_len + self.tail.len() as u64
    }

    /// Consume the body as a streaming reader.
    pub fn into_reader(self) -> impl Read + Send + Sync + 'static {
        Cursor::new(self.head)
            .chain(self.file)
            .chain(Cursor::new(self.tail))
    }
}
