//! User-facing strings, keyed by language code.
//!
//! A static lookup table: three languages, a handful of phrases.
//! Unknown languages fall back to English.

/// A user-facing phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    /// Greeting prefix for /start (the handler appends the username).
    Greeting,
    /// Prompt shown above the subscribe keyboard.
    SubscribePrompt,
    /// Label on each subscribe button.
    SubscribeButton,
    /// Shown when storage is unreachable and access cannot be verified.
    TryAgainLater,
    /// Warning when an interactive command is used outside a private chat.
    PrivateOnly,
}

/// Resolves a phrase for a language code.
///
/// Accepts full IETF tags (`ru-RU`); only the primary subtag matters.
pub fn text(lang: Option<&str>, key: Text) -> &'static str {
    let primary = lang
        .unwrap_or("en")
        .split(['-', '_'])
        .next()
        .unwrap_or("en");

    match primary {
        "ru" => match key {
            Text::Greeting => "Здравствуйте",
            Text::SubscribePrompt => "Чтобы пользоваться ботом, подпишитесь на каналы:",
            Text::SubscribeButton => "Подписаться",
            Text::TryAgainLater => "Сервис временно недоступен. Попробуйте позже.",
            Text::PrivateOnly => "Эта команда работает только в личных сообщениях.",
        },
        "uz" => match key {
            Text::Greeting => "Assalomu alaykum",
            Text::SubscribePrompt => {
                "Botdan foydalanishdan avval shu kanallarga obuna bo'ling:"
            }
            Text::SubscribeButton => "Obuna bo'lish",
            Text::TryAgainLater => "Xizmat vaqtincha ishlamayapti. Keyinroq urinib ko'ring.",
            Text::PrivateOnly => "Bu buyruq faqat shaxsiy suhbatda ishlaydi.",
        },
        _ => match key {
            Text::Greeting => "Hello",
            Text::SubscribePrompt => "To use this bot, please subscribe to these channels:",
            Text::SubscribeButton => "Subscribe",
            Text::TryAgainLater => "Service temporarily unavailable. Please try again later.",
            Text::PrivateOnly => "This command only works in private chats.",
        },
    }
}
