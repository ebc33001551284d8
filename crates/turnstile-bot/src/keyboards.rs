//! Inline keyboard construction.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;
use url::Url;

use turnstile_core::i18n::{text, Text};

/// Builds the subscribe keyboard: one URL button per outstanding link,
/// one per row, numbered so multiple buttons stay distinguishable.
///
/// Links that fail to parse as URLs are logged and skipped rather than
/// breaking the whole prompt.
pub fn subscribe_keyboard(links: &[String], lang: Option<&str>) -> InlineKeyboardMarkup {
    let label = text(lang, Text::SubscribeButton);

    let rows: Vec<Vec<InlineKeyboardButton>> = links
        .iter()
        .enumerate()
        .filter_map(|(i, link)| match Url::parse(link) {
            Ok(url) => Some(vec![InlineKeyboardButton::url(
                format!("{} {}", label, i + 1),
                url,
            )]),
            Err(e) => {
                warn!(link = %link, error = %e, "Skipping unparseable join link");
                None
            }
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_button_per_link() {
        let links = vec![
            "https://t.me/alpha".to_string(),
            "https://t.me/+abcdef".to_string(),
        ];

        let kb = subscribe_keyboard(&links, Some("en"));
        assert_eq!(kb.inline_keyboard.len(), 2);
        assert_eq!(kb.inline_keyboard[0].len(), 1);
        assert_eq!(kb.inline_keyboard[0][0].text, "Subscribe 1");
    }

    #[test]
    fn test_unparseable_link_is_skipped() {
        let links = vec![
            "https://t.me/alpha".to_string(),
            "not a url".to_string(),
            "https://t.me/beta".to_string(),
        ];

        let kb = subscribe_keyboard(&links, Some("en"));
        assert_eq!(kb.inline_keyboard.len(), 2);
    }

    #[test]
    fn test_labels_are_localized() {
        let links = vec!["https://t.me/alpha".to_string()];

        let kb = subscribe_keyboard(&links, Some("ru"));
        assert_eq!(kb.inline_keyboard[0][0].text, "Подписаться 1");
    }
}
