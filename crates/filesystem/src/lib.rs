use std::{io::Result as IoResult, path::Path};

#[doc(hidden)]
// Define a trait for file system operations
pub trait FileSystem: Send + Sync + 'static {
    fn read_to_string(&self, path: &Path) -> IoResult<String>;
}

// Implement the trait for the actual file system
#[derive(Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> IoResult<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockFileSystem;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use super::FileSystem;
    use std::{
        collections::HashMap,
        io::{Error as IoError, ErrorKind, Result as IoResult},
        path::{Path, PathBuf},
    };

    /// In-memory file system serving preloaded contents.
    #[derive(Clone, Default)]
    pub struct MockFileSystem {
        files: HashMap<PathBuf, String>,
    }

    impl MockFileSystem {
        pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
            self.files.insert(path.into(), content.into());
            self
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, path: &Path) -> IoResult<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| IoError::new(ErrorKind::NotFound, "NotFound"))
        }
    }
}
