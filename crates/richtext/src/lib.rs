//! Rich-text handling for editor-authored content.
//!
//! The admin panel stores WYSIWYG output as raw HTML. Before rendering, the
//! server has to decide whether a stored string is literal text or markup,
//! whether "rich" content is actually empty (an editor that was opened and
//! closed leaves `<p></p>` behind), and how to produce a plaintext fallback
//! for excerpts and meta descriptions. All of that is pure string work with
//! no I/O and no state.

mod detect;
mod excerpt;
mod sanitize;
mod strip;

pub use detect::{contains_html, contains_media_tags};
pub use excerpt::plain_text_excerpt;
pub use sanitize::sanitize_rich_text;
pub use strip::strip_tags;
