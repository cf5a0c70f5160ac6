//! Video generation: prompt augmentation and the long-running operation poller.

mod poller;

pub use poller::{ProgressStream, VideoPoller};

use hayat_types::AspectRatio;

/// Appended to every video prompt.
pub const WATERMARK_INSTRUCTION: &str =
    "A small, subtle watermark text 'Hayat Ai' must be present in the lower-left corner of the video.";

/// Framing instruction for the aspect ratios the video model understands from text.
pub fn aspect_ratio_instruction(aspect_ratio: &AspectRatio) -> Option<&'static str> {
    match aspect_ratio.as_str() {
        AspectRatio::WIDESCREEN => Some("Generate a video in a cinematic, widescreen 16:9 aspect ratio."),
        AspectRatio::VERTICAL => Some(
            "Generate a video in a vertical 9:16 aspect ratio, suitable for mobile platforms like TikTok or Reels.",
        ),
        AspectRatio::SQUARE => Some("Generate a video in a square 1:1 aspect ratio."),
        _ => None,
    }
}

/// Prompt actually submitted for a video: the user's text, then the aspect
/// instruction (if any), then the watermark instruction.
pub fn augment_video_prompt(prompt: &str, aspect_ratio: &AspectRatio) -> String {
    let mut augmented = prompt.to_string();
    if let Some(instruction) = aspect_ratio_instruction(aspect_ratio) {
        augmented = append_sentence(&augmented, instruction);
    }
    append_sentence(&augmented, WATERMARK_INSTRUCTION)
}

fn append_sentence(text: &str, sentence: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(|c: char| matches!(c, '.' | '!' | '?')) {
        format!("{} {}", trimmed, sentence)
    } else {
        format!("{}. {}", trimmed, sentence)
    }
}
