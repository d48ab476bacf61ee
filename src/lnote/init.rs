use crate::api::LnoteApi;
use crate::calendar::CalendarDate;
use crate::config::LnoteConfig;
use crate::error::{LnoteError, Result};
use crate::store::fs_backend::FsBackend;
use chrono::Local;
use directories::ProjectDirs;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

pub const DIR_ENV: &str = "LNOTE_DIR";

pub struct LnoteContext {
    pub api: LnoteApi<FsBackend>,
    pub config: LnoteConfig,
}

/// Where notebooks live: an explicit directory, else `$LNOTE_DIR`, else the
/// platform data directory.
pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "lnote")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LnoteError::Store("Could not determine data directory".to_string()))
}

/// Today's date on the local clock. Only the binary should call this; the
/// library takes "today" as a parameter everywhere else.
pub fn local_today() -> Result<CalendarDate> {
    CalendarDate::try_from(Local::now().date_naive())
}

pub fn initialize(data_dir: PathBuf, today: CalendarDate) -> Result<LnoteContext> {
    let config = LnoteConfig::load(&data_dir)?;
    debug!(
        "data dir {}, file ext {}, today {}",
        data_dir.display(),
        config.file_ext,
        today
    );
    let backend = FsBackend::new(data_dir.clone()).with_file_ext(&config.file_ext);
    let api = LnoteApi::new(backend, today, data_dir);
    Ok(LnoteContext { api, config })
}
