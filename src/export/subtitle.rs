//! SRT Subtitle Generation
//!
//! Produces subtitles for one actor's merged file. Timestamps are
//! merged-file-relative, not original-timeline-relative: an offset
//! accumulator advances by each segment's duration in start order, so
//! the entries line up with the spliced audio rather than the source
//! recording. Segments with no text in either field emit nothing but
//! still advance the accumulator, keeping later entries aligned.

use crate::timeline::model::Segment;

/// Format seconds as a zero-padded `HH:MM:SS,mmm` SRT timestamp.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis / 60_000) % 60;
    let secs = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Generate SRT text for segments already sorted by ascending start.
///
/// Entry numbering starts at 1 and increments only for emitted entries.
/// Each entry carries a `[{DIALECT}]` line for the regional text and/or
/// a `[STANDARD]` line, whichever is non-empty.
pub fn generate_srt(segments: &[Segment], dialect: &str) -> String {
    let dialect_tag = dialect.to_uppercase();
    let mut output = String::new();
    let mut offset = 0.0_f64;
    let mut entry_number = 1u32;

    for segment in segments {
        let duration = segment.duration();
        let start = offset;
        let end = offset + duration;
        offset = end;

        if segment.regional_text.is_empty() && segment.standard_text.is_empty() {
            continue;
        }

        output.push_str(&format!("{}\n", entry_number));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(start),
            format_srt_timestamp(end)
        ));
        if !segment.regional_text.is_empty() {
            output.push_str(&format!("[{}] {}\n", dialect_tag, segment.regional_text));
        }
        if !segment.standard_text.is_empty() {
            output.push_str(&format!("[STANDARD] {}\n", segment.standard_text));
        }
        output.push('\n');

        entry_number += 1;
    }

    output
}

// ============================================================================
// Tests
// ============================================================================
