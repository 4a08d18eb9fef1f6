use crate::rules::{faq, fallback, greeting, small_talk};
use crate::{Engine, FixedRandom, NormalizedMessage, Tier, respond_with};

fn classify(input: &str) -> (Tier, String) {
    let message = NormalizedMessage::new(input).unwrap();
    let m = Engine::builtin().classify(&message);
    (m.tier, m.trigger.to_string())
}

#[test]
fn builtin_cascade_examples() {
    // Array of (input, expected tier, expected trigger)
    let cases: Vec<(&str, Tier, &str)> = vec![
        // Bare greetings, any case, surrounding whitespace ignored.
        ("hi", Tier::Greeting, "greeting"),
        ("Hi", Tier::Greeting, "greeting"),
        ("HIII", Tier::Greeting, "greeting"),
        ("  hello  ", Tier::Greeting, "greeting"),
        ("yo", Tier::Greeting, "greeting"),
        ("sup", Tier::Greeting, "greeting"),
        ("hola", Tier::Greeting, "greeting"),
        ("wassup", Tier::Greeting, "greeting"),
        ("heya", Tier::Greeting, "greeting"),
        ("howdy", Tier::Greeting, "greeting"),
        // Greeting + address terms.
        ("hi there", Tier::Greeting, "greeting"),
        ("hey bro", Tier::Greeting, "greeting"),
        ("hello buddy", Tier::Greeting, "greeting"),
        ("hi there friend", Tier::Greeting, "greeting"),
        ("Hey Mate", Tier::Greeting, "greeting"),
        // Exact time-of-day greetings use the shared pool...
        ("good morning", Tier::Greeting, "greeting"),
        ("Good Evening", Tier::Greeting, "greeting"),
        ("good night", Tier::Greeting, "greeting"),
        // ...longer ones get their own.
        ("good morning everyone", Tier::Greeting, "good morning"),
        ("good afternoon folks", Tier::Greeting, "good afternoon"),
        ("good night all", Tier::Greeting, "good evening"),
        // Anchoring: none of these are greetings.
        ("hi, can you help", Tier::Fallback, "fallback"),
        ("hi, what is scoresight", Tier::Fallback, "fallback"),
        ("histogram", Tier::Fallback, "fallback"),
        ("history of arsenal", Tier::Fallback, "fallback"),
        ("hello?", Tier::Fallback, "fallback"),
        // Small talk, in table order.
        ("how are you", Tier::SmallTalk, "how are you"),
        ("how are you doing today", Tier::SmallTalk, "how are you"),
        ("whats up", Tier::SmallTalk, "whats up"),
        ("thank you so much", Tier::SmallTalk, "thank"),
        ("thanks", Tier::SmallTalk, "thank"),
        ("thanks a lot", Tier::SmallTalk, "thank"),
        ("love you", Tier::SmallTalk, "love you"),
        ("you are cool", Tier::SmallTalk, "you are cool"),
        ("you are awesome", Tier::SmallTalk, "you are awesome"),
        ("bye", Tier::SmallTalk, "bye"),
        ("goodbye", Tier::SmallTalk, "bye"),
        ("ok", Tier::SmallTalk, "ok"),
        ("okay", Tier::SmallTalk, "ok"),
        ("yes", Tier::SmallTalk, "yes"),
        ("no", Tier::SmallTalk, "no"),
        ("i know", Tier::SmallTalk, "no"),
        // FAQ topics.
        ("how does it work", Tier::Faq, "how-it-works"),
        ("explain the model", Tier::Faq, "how-it-works"),
        ("tell me about scoresight", Tier::Faq, "how-it-works"),
        ("how accurate is this", Tier::Faq, "accuracy"),
        ("what is the success rate", Tier::Faq, "accuracy"),
        ("can i trust it", Tier::Faq, "trust"),
        ("is it believable", Tier::Faq, "trust"),
        ("who built this", Tier::Faq, "who-built-it"),
        ("who made scoresight", Tier::Faq, "who-built-it"),
        ("which clubs can i pick", Tier::Faq, "teams-available"),
        // "team" (who-built-it) is listed before "teams".
        ("what teams are available", Tier::Faq, "who-built-it"),
        ("how to use this", Tier::Faq, "how-to-use"),
        ("get started", Tier::Faq, "how-to-use"),
        ("what can you do", Tier::Faq, "features"),
        ("what features are there", Tier::Faq, "features"),
        ("what statistics do you use", Tier::Faq, "data-used"),
        ("what stats", Tier::Faq, "data-used"),
        // Fallback.
        ("asdkjfh random text", Tier::Fallback, "fallback"),
        ("predict arsenal vs chelsea", Tier::Fallback, "fallback"),
    ];

    for (input, tier, trigger) in cases {
        assert_eq!(classify(input), (tier, trigger.to_string()), "classifying {input:?}");
    }
}

#[test]
fn accuracy_answer_is_exact() {
    let response = respond_with("how accurate is this", Engine::builtin(), &mut FixedRandom::last()).unwrap();
    assert_eq!(response.tier, Tier::Faq);
    assert_eq!(
        response.text,
        "Our current model achieves about 75% accuracy on historical test data. This includes correct prediction of match outcomes (win/draw/loss) and suggested scorelines. Pretty solid, right? 🎯"
    );
}

#[test]
fn thank_pool_is_used_for_thank_you() {
    let first = respond_with("thank you so much", Engine::builtin(), &mut FixedRandom::first()).unwrap();
    let last = respond_with("thank you so much", Engine::builtin(), &mut FixedRandom::last()).unwrap();
    assert_eq!(first.text, small_talk::RULES[2].replies[0]);
    assert_eq!(last.text, "Glad I could help! 👍");
}

#[test]
fn selection_bounds_map_to_first_and_last_entries() {
    let first = respond_with("hello", Engine::builtin(), &mut FixedRandom::first()).unwrap();
    let last = respond_with("hello", Engine::builtin(), &mut FixedRandom::last()).unwrap();
    assert_eq!(first.text, greeting::REPLIES[0]);
    assert_eq!(last.text, greeting::REPLIES[greeting::REPLIES.len() - 1]);

    let fallback_last = respond_with("asdkjfh random text", Engine::builtin(), &mut FixedRandom::last()).unwrap();
    assert_eq!(fallback_last.text, fallback::REPLIES[fallback::REPLIES.len() - 1]);
}

#[test]
fn tables_are_already_normalized() {
    let triggers = small_talk::RULES
        .iter()
        .map(|r| r.keyword)
        .chain(faq::TOPICS.iter().flat_map(|t| t.keywords.iter().copied()))
        .chain(greeting::TIME_OF_DAY.iter().flat_map(|t| t.phrases.iter().copied()));
    for trigger in triggers {
        assert_eq!(trigger, trigger.trim().to_lowercase(), "trigger {trigger:?}");
    }
}

#[test]
fn small_talk_order_keeps_thank_before_thanks() {
    let keywords: Vec<&str> = small_talk::RULES.iter().map(|r| r.keyword).collect();
    assert_eq!(
        keywords,
        vec![
            "how are you",
            "whats up",
            "thank",
            "thanks",
            "love you",
            "you are cool",
            "you are awesome",
            "bye",
            "ok",
            "yes",
            "no"
        ]
    );
}
