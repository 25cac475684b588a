//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. Every failure is
//! surfaced here as a printed message and a non-zero exit; actors that
//! cannot be exported (no mergeable audio) are skipped with a warning
//! rather than aborting the batch.

use std::fs;
use std::path::Path;

use chrono::Utc;
use log::{info, warn};

use crate::audio::io::decode_wav_file;
use crate::error::Result;
use crate::export::{export_actor, snapshot_filename};
use crate::project::snapshot::ProjectSnapshot;
use crate::timeline::model::TimelineModel;

/// Decode a WAV file and print its properties.
pub fn decode_info(audio: &Path) -> Result<()> {
    let source = decode_wav_file(audio)?;

    println!("File:        {}", audio.display());
    println!("Channels:    {}", source.num_channels());
    println!("Sample rate: {} Hz", source.sample_rate());
    println!("Frames:      {}", source.num_frames());
    println!("Duration:    {:.3}s", source.duration());

    Ok(())
}

/// Print a summary of a project snapshot.
pub fn info(project: &Path) -> Result<()> {
    let json = fs::read_to_string(project)?;
    let snapshot = ProjectSnapshot::from_json(&json)?;

    println!("Project:  {}", project.display());
    println!("Version:  {}", snapshot.version);
    println!("Dialect:  {}", snapshot.dialect);
    println!(
        "Audio:    {} ({:.3}s)",
        snapshot.audio_file_name, snapshot.audio_duration
    );
    println!("Actors:   {}", snapshot.actors.len());
    for actor in &snapshot.actors {
        println!(
            "  [{}] {} - {} segment(s)",
            actor.id,
            actor.name,
            actor.segment_ids.len()
        );
    }
    println!("Segments: {}", snapshot.segments.len());

    Ok(())
}

/// Create an empty snapshot for a freshly decoded recording.
pub fn new_snapshot(audio: &Path, dialect: &str, output: Option<&Path>) -> Result<()> {
    let source = decode_wav_file(audio)?;
    let file_name = audio
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let model = TimelineModel::new();
    let snapshot = ProjectSnapshot::capture(&model, dialect, &file_name, source.duration());

    let default_name = snapshot_filename(Utc::now());
    let path = output.unwrap_or_else(|| Path::new(&default_name));
    fs::write(path, snapshot.to_json()?)?;

    info!("Snapshot created: {}", path.display());
    println!("Snapshot created: {}", path.display());

    Ok(())
}

/// Export per-actor bundles for every actor in the snapshot.
pub fn export(audio: &Path, project: &Path, out_dir: &Path) -> Result<()> {
    let source = decode_wav_file(audio)?;
    let json = fs::read_to_string(project)?;

    let mut model = TimelineModel::new();
    let snapshot = ProjectSnapshot::from_json(&json)?;
    let dialect = snapshot.dialect.clone();
    snapshot.apply(&mut model, source.duration());

    fs::create_dir_all(out_dir)?;

    let actor_ids: Vec<u64> = model.actors().map(|a| a.id).collect();
    let mut exported = 0usize;

    for actor_id in actor_ids {
        match export_actor(&model, &source, actor_id, &dialect) {
            Ok(bundle) => {
                fs::write(out_dir.join(&bundle.wav_filename), &bundle.wav_bytes)?;
                fs::write(out_dir.join(&bundle.metadata_filename), &bundle.metadata_json)?;
                fs::write(out_dir.join(&bundle.subtitle_filename), &bundle.srt)?;
                println!("Exported {}", bundle.wav_filename);
                exported += 1;
            }
            Err(e) => {
                warn!("Skipping actor {}: {}", actor_id, e);
                println!("Skipped actor {}: {}", actor_id, e);
            }
        }
    }

    println!(
        "Exported {} actor(s) into {}",
        exported,
        out_dir.display()
    );

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
