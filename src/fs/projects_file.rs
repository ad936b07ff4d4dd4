use std::{io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};
use tracing::debug;

pub const PROJECTS_FILE_NAME: &str = "projects.conf";

/// Reads project names, one per line. A missing file is not an error and yields an empty list,
/// which the registry turns into the default project.
pub async fn load_projects(path: &Path) -> Result<Vec<String>> {
    async fn read(path: &Path) -> std::result::Result<Vec<String>, std::io::Error> {
        let file = File::open(path).await?;
        file.lock_shared()?;
        let mut lines = BufReader::new(file).lines();
        let mut names = vec![];
        while let Some(line) = lines.next_line().await? {
            names.push(line);
        }
        lines.into_inner().into_inner().unlock_async().await?;
        Ok(names)
    }

    match read(path).await {
        Ok(names) => {
            debug!("Loaded {} projects from {path:?}", names.len());
            Ok(names)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No project file at {path:?}, using defaults");
            Ok(vec![])
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read projects from {path:?}")),
    }
}

/// Replaces contents of the project file with `names`.
pub async fn save_projects(path: &Path, names: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {path:?}"))?;
    file.lock_exclusive()?;
    file.set_len(0).await?;

    let mut data = String::new();
    for name in names {
        data.push_str(name);
        data.push('\n');
    }
    file.write_all(data.as_bytes()).await?;
    file.flush().await?;
    file.unlock_async().await?;

    debug!("Saved {} projects into {path:?}", names.len());
    Ok(())
}
