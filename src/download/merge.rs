//! Reassembly of segment files into the final output.

use super::plan::DownloadPlan;
use crate::error::{Error, Result};

use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncWriteExt, BufWriter},
};
use tracing::{debug, info};

/// Size of the reads performed while merging.
pub const MERGE_BUFFER_SIZE: usize = 8 * 1024;

/// Concatenates the segment files of `plan` into its output, in ascending
/// index order, and returns the size of the output.
///
/// A single segment plan was written straight to the output and is left as
/// is. Any I/O error aborts the merge; a partially written output is left in
/// place for inspection.
pub async fn merge(plan: &DownloadPlan) -> Result<u64> {
    if !plan.is_segmented() {
        return Ok(fs::metadata(plan.output()).await?.len());
    }

    let mut segments: Vec<_> = plan.segments().iter().collect();
    segments.sort_by_key(|s| s.index);

    info!("Merging Files: {}", plan.output().display());
    let mut writer = BufWriter::new(File::create(plan.output()).await?);
    let mut buf = vec![0u8; MERGE_BUFFER_SIZE];
    let mut total: u64 = 0;

    for segment in segments {
        debug!("Appending {:?}", &segment.path);
        let mut reader = File::open(&segment.path).await.map_err(|e| {
            Error::Internal(format!(
                "Cannot open segment {} ({}): {}",
                segment.index,
                segment.path.display(),
                e
            ))
        })?;
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n]).await?;
            total += n as u64;
        }
    }

    writer.flush().await?;
    writer.into_inner().sync_all().await?;
    Ok(total)
}

/// Deletes the temporary segment files of a merged plan.
///
/// Does nothing for a single segment plan, whose only file is the output.
pub async fn remove_parts(plan: &DownloadPlan) -> Result<()> {
    if !plan.is_segmented() {
        return Ok(());
    }
    for segment in plan.segments() {
        match fs::remove_file(&segment.path).await {
            Ok(()) => debug!("Removed {:?}", &segment.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
