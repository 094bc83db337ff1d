use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::info;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::batch::ConvertedSample;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

/// Write each converted sample as an individual file under `dir`.
pub fn save_to_directory(samples: &[ConvertedSample], dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for sample in samples {
        fs::write(dir.join(&sample.js_name), &sample.js_code)?;
    }
    info!("saved {} samples to {}", samples.len(), dir.display());
    Ok(())
}

/// Write the converted samples as entries of a deflated ZIP archive.
pub fn save_to_zip(samples: &[ConvertedSample], path: &Path) -> Result<(), PackageError> {
    let file = fs::File::create(path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for sample in samples {
        writer.start_file(sample.js_name.as_str(), options)?;
        writer.write_all(sample.js_code.as_bytes())?;
    }
    writer.finish()?;

    info!("created archive {}", path.display());
    Ok(())
}
