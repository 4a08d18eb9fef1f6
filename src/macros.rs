// Table-building macros for the built-in rule data in `src/rules/**`.
//
// Every reply list uses a `+` repetition, so an empty response set in the
// built-in tables is a compile error rather than a startup failure.

#[macro_export]
macro_rules! replies {
    ($($reply:literal),+ $(,)?) => {
        &[ $($reply),+ ]
    };
}

#[macro_export]
macro_rules! small_talk {
    ( $( $keyword:literal => [ $($reply:literal),+ $(,)? ] ),+ $(,)? ) => {
        &[ $(
            $crate::rules::StaticSmallTalk { keyword: $keyword, replies: &[ $($reply),+ ] }
        ),+ ]
    };
}

#[macro_export]
macro_rules! faq {
    (
        id: $id:literal,
        keywords: [ $($keyword:literal),+ $(,)? ],
        answer: $answer:literal
        $(,)?
    ) => {
        $crate::rules::StaticFaq { id: $id, keywords: &[ $($keyword),+ ], answer: $answer }
    };
}

#[macro_export]
macro_rules! time_of_day {
    (
        name: $name:literal,
        phrases: [ $($phrase:literal),+ $(,)? ],
        replies: [ $($reply:literal),+ $(,)? ]
        $(,)?
    ) => {
        $crate::rules::StaticTimeOfDay { name: $name, phrases: &[ $($phrase),+ ], replies: &[ $($reply),+ ] }
    };
}
