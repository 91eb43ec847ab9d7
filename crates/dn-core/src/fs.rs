//! Extension-keyed load/save adapters and the zip backup helper.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde_json::Value;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::{Error, Result};

fn extension_of(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .ok_or_else(|| Error::Format(path.display().to_string()))
}

pub fn load(path: &Path) -> Result<Value> {
    let ext = extension_of(path)?;
    if !path.is_file() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    match ext.as_str() {
        "json" => Ok(serde_json::from_str(&text)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&text)?),
        other => Err(Error::Format(other.to_string())),
    }
}

pub fn save(path: &Path, doc: &Value) -> Result<()> {
    let ext = extension_of(path)?;
    let text = match ext.as_str() {
        "json" => {
            let mut s = serde_json::to_string_pretty(doc)?;
            s.push('\n');
            s
        }
        "yaml" | "yml" => serde_yaml::to_string(doc)?,
        other => return Err(Error::Format(other.to_string())),
    };
    fs::write(path, text)?;
    Ok(())
}

// Zip backup of the document file (non-destructive)
pub fn backup_file(file: &Path) -> io::Result<PathBuf> {
    if !file.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
    }
    let parent = file.parent().unwrap_or(Path::new("."));
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("document");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = parent.join(format!("{}_{}.zip", stem, ts));

    let out = fs::File::create(&dest)?;
    let mut zip = zip::ZipWriter::new(out);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    let name = file.file_name().and_then(|s| s.to_str()).unwrap_or("document");
    zip.start_file(name, options)?;
    let data = fs::read(file)?;
    zip.write_all(&data)?;
    zip.finish()?;
    Ok(dest)
}
