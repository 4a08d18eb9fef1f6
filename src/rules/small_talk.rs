use super::StaticSmallTalk;

/// Small-talk keywords in evaluation order.
///
/// "thank" sits before "thanks" and therefore shadows it; "ok" and "no" are
/// plain substrings and fire inside longer words too ("book", "know").
pub(crate) const RULES: &[StaticSmallTalk] = small_talk! {
    "how are you" => [
        "I'm doing great, thanks! Ready to help with predictions ⚽",
        "Fantastic! Always excited to talk football! How about you?",
        "I'm awesome! 😊 Ready to predict some matches for you!",
    ],
    "whats up" => [
        "Just here helping predict EPL matches! What's up with you? ⚽",
        "Not much! Ready to analyze some football data for you! 😊",
        "All good! Looking forward to helping you with predictions!",
    ],
    "thank" => [
        "You're very welcome! 😊 Anytime!",
        "My pleasure! ⚽ Happy to help!",
        "No problem at all! Let me know if you need anything else! ✨",
        "Glad I could help! 👍",
    ],
    "thanks" => [
        "You're welcome! 😊",
        "Anytime! ⚽ Happy predicting!",
        "My pleasure! 🌟",
    ],
    "love you" => [
        "Aww thanks! 😊 Let's get some match predictions going!",
        "Love helping you with predictions too! ⚽💙",
        "You're awesome! Let's predict some winners! 🔥",
    ],
    "you are cool" => [
        "Thanks! 😎 You're pretty cool too!",
        "Aww, appreciate it! ⚽ You're cooler!",
        "Thanks! 🌟 Now let's make some cool predictions!",
    ],
    "you are awesome" => [
        "Thanks so much! 😊 You're awesome too!",
        "You're making me blush! ✨ Let's predict some matches!",
        "Appreciate it! ⚽ Now let's find some winners!",
    ],
    "bye" => [
        "Goodbye! 👋 Come back soon for more predictions!",
        "See you later! ⚽ Good luck with your matches!",
        "Bye! 😊 Happy predicting!",
    ],
    "ok" => [
        "Great! 👍 Anything else I can help with?",
        "Perfect! Let me know if you need anything else! ⚽",
        "Sounds good! 😊",
    ],
    "yes" => [
        "Awesome! 🔥 What would you like to know?",
        "Great! How can I assist you? ⚽",
        "Perfect! 😊 I'm here to help!",
    ],
    "no" => [
        "No problem! Let me know if you need anything! 😊",
        "Okay! I'm here if you change your mind! ⚽",
        "Alright! Feel free to ask anytime! 👍",
    ],
};
