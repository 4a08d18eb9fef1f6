use super::StaticFaq;

/// FAQ topics in evaluation order. Keywords overlap between topics
/// ("reliable" is both an accuracy and a trust trigger); the earlier topic
/// wins.
pub(crate) const TOPICS: &[StaticFaq] = &[
    faq! {
        id: "how-it-works",
        keywords: ["how does", "how it works", "what does scoresight do", "explain", "tell me about"],
        answer: "ScoreSight predicts EPL match outcomes using AI trained on historical match data. Our machine learning model analyzes team performance, stats, and patterns to forecast match results with high accuracy. ⚽📊",
    },
    faq! {
        id: "accuracy",
        keywords: ["accurate", "accuracy", "how accurate", "success rate", "correct", "reliable"],
        answer: "Our current model achieves about 75% accuracy on historical test data. This includes correct prediction of match outcomes (win/draw/loss) and suggested scorelines. Pretty solid, right? 🎯",
    },
    faq! {
        id: "trust",
        keywords: ["trust", "reliable", "can i trust", "should i trust", "believable"],
        answer: "These are probabilistic predictions, not guaranteed outcomes. Football is inherently unpredictable, but our model consistently achieves 75%+ accuracy on test data. Use these predictions as guidance, not guarantees! ⚽✨",
    },
    faq! {
        id: "who-built-it",
        keywords: ["who built", "who made", "creator", "developer", "team"],
        answer: "The ScoreSight Team – a group of data scientists and developers passionate about combining machine learning with sports analytics! 👨‍💻⚽",
    },
    faq! {
        id: "teams-available",
        keywords: ["teams", "which teams", "what teams", "clubs", "available teams"],
        answer: "You can predict matches for all 19 Premier League teams, including Arsenal, Chelsea, Liverpool, Manchester City, Manchester United, Tottenham, and many more! ⚽🏆",
    },
    faq! {
        id: "how-to-use",
        keywords: ["how to use", "how do i", "predict match", "make prediction", "get started"],
        answer: "Simply head to the Predict Match page, fill in the match statistics (teams, shots, corners, fouls, cards), and click \"Predict Match Outcome\". Our AI will forecast the result and suggested scoreline instantly! 🚀⚽",
    },
    faq! {
        id: "features",
        keywords: ["features", "what can you do", "capabilities", "functions"],
        answer: "I can help you predict EPL match outcomes, explain how our AI works, share accuracy stats, and guide you through using the predictor. Just ask away! 😊⚽",
    },
    faq! {
        id: "data-used",
        keywords: ["data", "statistics", "stats", "what data"],
        answer: "Our model uses 15+ match statistics including shots, shots on target, corners, fouls, yellow/red cards, and half-time scores to make accurate predictions! 📊⚽",
    },
];
