pub(crate) const REPLIES: &[&str] = replies![
    "Hmm… I'm not sure about that 🤔 but I can help you with EPL match predictions!",
    "Interesting! I don't have the answer to that, but I can predict football matches for you! ⚽",
    "That's a great question! I'm mainly focused on EPL predictions, but feel free to ask about that! 😊",
    "I'm not entirely sure about that, but ScoreSight is here to help predict EPL match outcomes! Feel free to ask me about how the predictions work, team data, or accuracy! ⚽✨",
    "Good question! I specialize in football predictions. Want to know about our AI accuracy or how to use the predictor? 🔥",
    "I'm still learning! 😊 But I'm great at predicting EPL matches. Ask me about teams, accuracy, or how it works!",
    "Hmm, not my area of expertise! But I can tell you all about EPL match predictions! ⚽📊",
];
