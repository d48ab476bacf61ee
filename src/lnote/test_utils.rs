use crate::api::LnoteApi;
use crate::calendar::CalendarDate;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

/// An `LnoteApi` over a throwaway notebooks directory, with a fixed "today".
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub api: LnoteApi<FsBackend>,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new(today: CalendarDate) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let api = LnoteApi::new(FsBackend::new(root.clone()), today, root.clone());
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }
}
