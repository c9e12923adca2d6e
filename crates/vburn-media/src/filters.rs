//! FFmpeg video filter construction.

/// Escape single quotes in text destined for a drawtext argument.
///
/// `'` becomes `'\''` so the quote does not terminate the filter argument.
/// Other shell-special characters are left alone; the command is spawned
/// without a shell, so only the filter syntax itself needs protecting.
pub fn escape_drawtext_content(text: &str) -> String {
    text.replace('\'', "'\\''")
}

/// Build the drawtext filter for a burned-in text overlay.
///
/// Fixed styling: font size 36, white text on a semi-transparent black box,
/// horizontally centered, 50 pixels from the top.
pub fn build_text_overlay_filter(text: &str) -> String {
    format!(
        "drawtext=text='{}':fontsize=36:fontcolor=white:box=1:boxcolor=black@0.5:boxborderw=5:x=(w-text_w)/2:y=50",
        escape_drawtext_content(text)
    )
}
