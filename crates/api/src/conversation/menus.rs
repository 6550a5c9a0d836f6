use crate::i18n::{lookup, Text};
use pantry_reminder_domain::{Button, Command, Keyboard, Locale, NotifyChoice};

pub const LANGUAGE_PREFIX: &str = "lang_";
pub const NOTIFY_PREFIX: &str = "notify_";

const MAIN_MENU: [(Text, Command); 4] = [
    (Text::MenuAdd, Command::Add),
    (Text::MenuList, Command::List),
    (Text::MenuLanguage, Command::Language),
    (Text::MenuHelp, Command::Help),
];

pub fn main_menu(locale: Locale) -> Keyboard {
    Keyboard::Menu(
        MAIN_MENU
            .iter()
            .map(|(label, _)| lookup(locale, *label).to_string())
            .collect(),
    )
}

/// The command behind a main menu label of the given locale
pub fn command_for_label(locale: Locale, text: &str) -> Option<Command> {
    let text = text.trim();
    MAIN_MENU
        .iter()
        .find(|(label, _)| lookup(locale, *label) == text)
        .map(|(_, command)| *command)
}

pub fn language_menu() -> Keyboard {
    Keyboard::Inline(
        Locale::ALL
            .chunks(2)
            .map(|row| {
                row.iter()
                    .map(|locale| {
                        Button::new(
                            locale.label(),
                            format!("{}{}", LANGUAGE_PREFIX, locale.code()),
                        )
                    })
                    .collect()
            })
            .collect(),
    )
}

pub fn notify_menu(locale: Locale) -> Keyboard {
    let button = |label: Text, choice: NotifyChoice| {
        Button::new(
            lookup(locale, label),
            format!("{}{}", NOTIFY_PREFIX, choice.code()),
        )
    };
    Keyboard::Inline(vec![
        vec![
            button(Text::NotifyDay, NotifyChoice::Day),
            button(Text::NotifyWeek, NotifyChoice::Week),
            button(Text::NotifyBoth, NotifyChoice::Both),
        ],
        vec![button(Text::NotifyCustom, NotifyChoice::Custom)],
    ])
}
