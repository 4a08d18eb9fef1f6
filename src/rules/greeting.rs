use super::StaticTimeOfDay;

/// Whole-message greeting patterns. They are compiled case-insensitively and
/// must be anchored at both ends so "histogram" or "hi, can you help" do not
/// count as greetings.
pub(crate) const PATTERNS: &[&str] = &[
    r"^(hi|hii|hiii|hey|hello|yo|sup|hola|wassup|heya|howdy)$",
    r"^(hi|hey|hello)(\s+(there|bro|buddy|mate|friend|dude))+$",
    r"^good\s+(morning|afternoon|evening|night)$",
];

pub(crate) const REPLIES: &[&str] = replies![
    "Hi! 👋 Welcome to ScoreSight — how can I help you today?",
    "Hello! 😊 What match would you like to predict today?",
    "Hey there! ⚽ Ready for some EPL insights?",
    "Hi! 🔥 Let's predict some match outcomes together!",
    "Hello! ✨ Welcome to your EPL prediction assistant!",
    "Hey! 😊 What can I do for you?",
    "Yo! ⚽ Ready to dive into some football predictions?",
    "Good to see you! 👋 How can I assist with match predictions?",
    "Hey there! 🌟 Let's get started with some EPL action!",
    "Hi! Hope you're ready for some accurate predictions! ⚽",
];

/// Checked by containment after `PATTERNS`, so an exact "good morning" still
/// gets the shared greeting pool while "good morning everyone" lands here.
pub(crate) const TIME_OF_DAY: &[StaticTimeOfDay] = &[
    time_of_day! {
        name: "good morning",
        phrases: ["good morning"],
        replies: [
            "Good morning! ☀️ Hope you're ready for some EPL predictions!",
            "Morning! 🌅 Let's make today's match predictions count!",
            "Good morning! ⚽ Ready to predict some winners today?",
        ],
    },
    time_of_day! {
        name: "good afternoon",
        phrases: ["good afternoon"],
        replies: [
            "Good afternoon! 🌤️ Ready for some football insights?",
            "Afternoon! ⚽ Let's predict some matches!",
            "Good afternoon! What EPL match can I help you with?",
        ],
    },
    time_of_day! {
        name: "good evening",
        phrases: ["good evening", "good night"],
        replies: [
            "Good evening! 🌙 Perfect time for match predictions!",
            "Evening! ⚽ Let's see what matches we can predict tonight!",
            "Good evening! Ready to analyze some EPL action?",
        ],
    },
];
