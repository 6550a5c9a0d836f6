use pantry_reminder_domain::Locale;

/// Keys of the localization table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    ChooseLanguage,
    Welcome,
    MenuAdd,
    MenuList,
    MenuLanguage,
    MenuHelp,
    AskName,
    AskExpiration,
    AskNotify,
    NotifyDay,
    NotifyWeek,
    NotifyBoth,
    NotifyCustom,
    Added,
    AskCustomTime,
    CustomAdded,
    ListEmpty,
    /// `{name}`, `{date}` and `{options}`
    ListEntry,
    OptionDay,
    OptionWeek,
    /// `{date}`
    OptionCustom,
    Help,
    /// `{name}`
    ReminderWeek,
    /// `{name}`
    ReminderDay,
    /// `{name}` and `{date}`
    ReminderCustom,
    Failure,
}

/// Marker prepended to a prompt that is repeated after invalid input
pub const INVALID_INPUT_MARKER: &str = "❌ ";

pub fn lookup(locale: Locale, key: Text) -> &'static str {
    match locale {
        Locale::Ru => ru(key),
        Locale::En => en(key),
        Locale::Zh => zh(key),
        Locale::Hi => hi(key),
    }
}

/// Replaces every `{placeholder}` in `template` with its value
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}

/// Escapes user provided text before it is embedded in an HTML formatted message
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn ru(key: Text) -> &'static str {
    match key {
        Text::ChooseLanguage => "🌍 Выберите язык:",
        Text::Welcome => "👋 Привет! Что будем делать?",
        Text::MenuAdd => "➕ Добавить продукт",
        Text::MenuList => "📦 Список продуктов",
        Text::MenuLanguage => "🌐 Сменить язык",
        Text::MenuHelp => "❓ Помощь",
        Text::AskName => "Введите название продукта:",
        Text::AskExpiration => "Введите срок годности (DD.MM.YYYY):",
        Text::AskNotify => "Когда отправить уведомление?",
        Text::NotifyDay => "1️⃣ День",
        Text::NotifyWeek => "7️⃣ Дней",
        Text::NotifyBoth => "➕ Оба",
        Text::NotifyCustom => "⏰ Свой",
        Text::Added => "✅ Продукт добавлен и напоминания запланированы.",
        Text::AskCustomTime => "Введите дату и время уведомления (DD.MM.YYYY HH:MM):",
        Text::CustomAdded => "✅ Пользовательское напоминание запланировано.",
        Text::ListEmpty => "Список продуктов пуст.",
        Text::ListEntry => "• {name} — до {date} (⏱ {options})",
        Text::OptionDay => "1д",
        Text::OptionWeek => "7д",
        Text::OptionCustom => "в {date}",
        Text::Help => {
            "🆘 <b>Помощь</b>\n\
             • /add — добавить продукт\n\
             • /list — показать список\n\
             • /language — сменить язык\n\
             • /help — помощь\n\n\
             Или воспользуйтесь кнопками ниже."
        }
        Text::ReminderWeek => "⏰ «{name}» истечёт через 7 дней. Совет: выкиньте или съешьте.",
        Text::ReminderDay => "⚠️ «{name}» истечёт завтра. Совет: выкиньте или съешьте.",
        Text::ReminderCustom => {
            "🔔 Напоминание: «{name}» истекает {date}.\nСовет: выкиньте или съешьте."
        }
        Text::Failure => "⚠️ Что-то пошло не так, попробуйте ещё раз.",
    }
}

fn en(key: Text) -> &'static str {
    match key {
        Text::ChooseLanguage => "🌍 Choose your language:",
        Text::Welcome => "👋 Hello! What would you like to do?",
        Text::MenuAdd => "➕ Add product",
        Text::MenuList => "📦 List products",
        Text::MenuLanguage => "🌐 Change language",
        Text::MenuHelp => "❓ Help",
        Text::AskName => "Enter product name:",
        Text::AskExpiration => "Enter expiration date (DD.MM.YYYY):",
        Text::AskNotify => "When to send the reminder?",
        Text::NotifyDay => "1️⃣ Day",
        Text::NotifyWeek => "7️⃣ Days",
        Text::NotifyBoth => "➕ Both",
        Text::NotifyCustom => "⏰ Custom",
        Text::Added => "✅ Product added and reminders scheduled.",
        Text::AskCustomTime => "Enter custom reminder date & time (DD.MM.YYYY HH:MM):",
        Text::CustomAdded => "✅ Custom reminder scheduled.",
        Text::ListEmpty => "Your product list is empty.",
        Text::ListEntry => "• {name} — until {date} (⏱ {options})",
        Text::OptionDay => "1d",
        Text::OptionWeek => "7d",
        Text::OptionCustom => "at {date}",
        Text::Help => {
            "🆘 <b>Help</b>\n\
             • /add — add product\n\
             • /list — show products\n\
             • /language — change language\n\
             • /help — help\n\n\
             Or use the buttons below."
        }
        Text::ReminderWeek => "⏰ «{name}» expires in 7 days. Tip: throw it away or eat it.",
        Text::ReminderDay => "⚠️ «{name}» expires tomorrow. Tip: throw it away or eat it.",
        Text::ReminderCustom => {
            "🔔 Reminder: «{name}» expires {date}.\nTip: throw it away or eat it."
        }
        Text::Failure => "⚠️ Something went wrong, please try again.",
    }
}

fn zh(key: Text) -> &'static str {
    match key {
        Text::ChooseLanguage => "🌍 请选择语言：",
        Text::Welcome => "👋 你好！需要做什么？",
        Text::MenuAdd => "➕ 添加产品",
        Text::MenuList => "📦 产品列表",
        Text::MenuLanguage => "🌐 切换语言",
        Text::MenuHelp => "❓ 帮助",
        Text::AskName => "请输入产品名称：",
        Text::AskExpiration => "请输入保质期 (DD.MM.YYYY)：",
        Text::AskNotify => "何时发送提醒？",
        Text::NotifyDay => "1️⃣ 一天",
        Text::NotifyWeek => "7️⃣ 七天",
        Text::NotifyBoth => "➕ 两者",
        Text::NotifyCustom => "⏰ 自定义",
        Text::Added => "✅ 产品已添加，提醒已安排。",
        Text::AskCustomTime => "请输入自定义提醒日期和时间 (DD.MM.YYYY HH:MM)：",
        Text::CustomAdded => "✅ 自定义提醒已安排。",
        Text::ListEmpty => "您的产品列表为空。",
        Text::ListEntry => "• {name} — 截止 {date} (⏱ {options})",
        Text::OptionDay => "1天",
        Text::OptionWeek => "7天",
        Text::OptionCustom => "{date}",
        Text::Help => {
            "🆘 <b>帮助</b>\n\
             • /add — 添加产品\n\
             • /list — 显示列表\n\
             • /language — 切换语言\n\
             • /help — 帮助\n\n\
             或使用下面的按钮。"
        }
        Text::ReminderWeek => "⏰ «{name}» 将在 7 天后过期。建议：扔掉或吃掉。",
        Text::ReminderDay => "⚠️ «{name}» 明天过期。建议：扔掉或吃掉。",
        Text::ReminderCustom => "🔔 提醒：«{name}» 将于 {date} 过期。\n建议：扔掉或吃掉。",
        Text::Failure => "⚠️ 出了点问题，请重试。",
    }
}

fn hi(key: Text) -> &'static str {
    match key {
        Text::ChooseLanguage => "🌍 कृपया भाषा चुनें:",
        Text::Welcome => "👋 नमस्ते! आप क्या करना चाहेंगे?",
        Text::MenuAdd => "➕ उत्पाद जोड़ें",
        Text::MenuList => "📦 उत्पाद सूची",
        Text::MenuLanguage => "🌐 भाषा बदलें",
        Text::MenuHelp => "❓ सहायता",
        Text::AskName => "उत्पाद का नाम दर्ज करें:",
        Text::AskExpiration => "समाप्ति तिथि दर्ज करें (DD.MM.YYYY):",
        Text::AskNotify => "रिमाइंडर कब भेजें?",
        Text::NotifyDay => "1️⃣ एक दिन",
        Text::NotifyWeek => "7️⃣ सात दिन",
        Text::NotifyBoth => "➕ दोनों",
        Text::NotifyCustom => "⏰ कस्टम",
        Text::Added => "✅ उत्पाद जोड़ा गया और रिमाइंडर निर्धारित किया गया।",
        Text::AskCustomTime => "कस्टम रिमाइंडर दिनांक और समय दर्ज करें (DD.MM.YYYY HH:MM):",
        Text::CustomAdded => "✅ कस्टम रिमाइंडर शेड्यूल किया गया।",
        Text::ListEmpty => "आपकी उत्पाद सूची खाली है।",
        Text::ListEntry => "• {name} — {date} तक (⏱ {options})",
        Text::OptionDay => "1दि",
        Text::OptionWeek => "7दि",
        Text::OptionCustom => "{date} पर",
        Text::Help => {
            "🆘 <b>सहायता</b>\n\
             • /add — उत्पाद जोड़ें\n\
             • /list — सूची दिखाएँ\n\
             • /language — भाषा बदलें\n\
             • /help — सहायता\n\n\
             या नीचे बटन का उपयोग करें।"
        }
        Text::ReminderWeek => "⏰ «{name}» 7 दिनों में समाप्त हो जाएगा। सुझाव: फेंक दें या खा लें।",
        Text::ReminderDay => "⚠️ «{name}» कल समाप्त हो जाएगा। सुझाव: फेंक दें या खा लें।",
        Text::ReminderCustom => {
            "🔔 रिमाइंडर: «{name}» {date} को समाप्त होगा।\nसुझाव: फेंक दें या खा लें।"
        }
        Text::Failure => "⚠️ कुछ गलत हो गया, कृपया फिर से प्रयास करें।",
    }
}
