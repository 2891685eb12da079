//! Chat transcript renderer.

use crate::ui::helpers::push_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChatView;

/// Appends the conversation, one speaker-colored line per message.
///
/// Multi-line replies keep their line breaks, indented under the speaker.
pub fn render_transcript(out: &mut String, chat: &ChatView, theme: &Theme, cols: usize) {
    for line in &chat.lines {
        let (speaker, color) = if line.from_user {
            ("You", &theme.colors.user_fg)
        } else {
            ("Atlas", &theme.colors.bot_fg)
        };
        let style = Theme::fg(color);

        let mut text_lines = line.text.lines();
        let first = text_lines.next().unwrap_or_default();
        push_line(out, &style, &format!(" {speaker:>5}: {first}"), cols);
        for rest in text_lines {
            push_line(out, &style, &format!("        {rest}"), cols);
        }
    }

    if chat.typing {
        let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        push_line(out, &style, "  Atlas is typing...", cols);
    }
}
