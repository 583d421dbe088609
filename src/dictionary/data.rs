//! Built-in rule data.
//!
//! These tables are data, not logic: the phrase list targets stock
//! AI-assistant vocabulary, the contraction table is the fixed second
//! rewrite pass, and the interjection catalog feeds sentence-head
//! insertion. External YAML files can replace the phrase list and the
//! interjection catalog; the contraction table is fixed.

/// Default phrase rewrites, (pattern, replacement).
///
/// Longer entries are listed first for readability only; the dictionary
/// re-sorts by pattern length at build time.
pub const BUILTIN_RULES: &[(&str, &str)] = &[
    ("it is important to note that", "note that"),
    ("it is worth noting that", "worth noting,"),
    ("it should be noted that", "keep in mind"),
    ("plays a crucial role in", "matters a lot for"),
    ("plays a significant role in", "matters for"),
    ("in the rapidly evolving landscape of", "in today's"),
    ("in today's fast-paced world", "these days"),
    ("demonstrates significant improvements", "really helped a lot"),
    ("serves as a testament to", "shows"),
    ("stands as a testament to", "shows"),
    ("at the end of the day", "ultimately"),
    ("when it comes to", "for"),
    ("in order to", "to"),
    ("a wide range of", "many"),
    ("a vast array of", "lots of"),
    ("a myriad of", "many"),
    ("a plethora of", "plenty of"),
    ("first and foremost", "first"),
    ("in today's digital age", "nowadays"),
    ("in the realm of", "in"),
    ("embark on a journey", "get started"),
    ("unlock the potential of", "get more out of"),
    ("unlock the power of", "make the most of"),
    ("harness the power of", "use"),
    ("delve deeper into", "dig into"),
    ("delve into", "dig into"),
    ("dive deep into", "dig into"),
    ("navigate the complexities of", "deal with"),
    ("navigating the landscape of", "working through"),
    ("a rich tapestry of", "a mix of"),
    ("the intricate tapestry of", "the mix of"),
    ("it's essential to", "you should"),
    ("it is essential to", "you should"),
    ("is essential for", "matters for"),
    ("seamlessly integrates", "works well"),
    ("seamlessly integrate", "fit together"),
    ("game-changer", "big deal"),
    ("cutting-edge", "modern"),
    ("state-of-the-art", "modern"),
    ("revolutionize", "change"),
    ("revolutionizing", "changing"),
    ("groundbreaking", "notable"),
    ("leverage", "use"),
    ("leveraging", "using"),
    ("utilize", "use"),
    ("utilizing", "using"),
    ("utilization", "use"),
    ("facilitate", "help with"),
    ("facilitates", "helps with"),
    ("furthermore", "also"),
    ("moreover", "besides that"),
    ("additionally", "also"),
    ("consequently", "so"),
    ("subsequently", "then"),
    ("nevertheless", "still"),
    ("notwithstanding", "even so"),
    ("in conclusion", "to wrap up"),
    ("in summary", "so, overall"),
    ("to summarize", "in short"),
    ("comprehensive", "thorough"),
    ("multifaceted", "layered"),
    ("paradigm shift", "big change"),
    ("holistic approach", "broad approach"),
    ("robust solution", "solid fix"),
    ("underscores", "highlights"),
    ("underscore", "highlight"),
    ("pivotal", "key"),
    ("crucial", "important"),
    ("meticulously", "carefully"),
    ("meticulous", "careful"),
    ("endeavor", "effort"),
    ("commence", "start"),
    ("ascertain", "figure out"),
    ("elucidate", "explain"),
    ("aforementioned", "mentioned"),
    ("henceforth", "from now on"),
    ("albeit", "though"),
    ("whilst", "while"),
    ("amongst", "among"),
    ("myriad", "many"),
    ("plethora", "plenty"),
    ("synergy", "teamwork"),
    ("optimal", "best"),
    ("optimally", "at its best"),
];

/// Fixed contraction table applied after phrase substitution,
/// (expanded, contracted).
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("did not", "didn't"),
    ("is not", "isn't"),
    ("are not", "aren't"),
    ("was not", "wasn't"),
    ("were not", "weren't"),
    ("has not", "hasn't"),
    ("have not", "haven't"),
    ("had not", "hadn't"),
    ("will not", "won't"),
    ("would not", "wouldn't"),
    ("should not", "shouldn't"),
    ("could not", "couldn't"),
    ("cannot", "can't"),
    ("can not", "can't"),
    ("it is", "it's"),
    ("it has", "it's"),
    ("that is", "that's"),
    ("there is", "there's"),
    ("they are", "they're"),
    ("we are", "we're"),
    ("you are", "you're"),
    ("i am", "I'm"),
    ("let us", "let's"),
    ("we have", "we've"),
    ("you have", "you've"),
    ("they have", "they've"),
    ("who is", "who's"),
    ("what is", "what's"),
];

/// Default interjection catalog, (text, usage weight).
///
/// Weights are relative frequencies; with equal weights the draw is
/// uniform. Entries are inserted verbatim ahead of a sentence, so each
/// carries its own trailing punctuation and space.
pub const INTERJECTIONS: &[(&str, u32)] = &[
    ("Honestly, ", 3),
    ("Look, ", 2),
    ("To be fair, ", 2),
    ("Frankly, ", 2),
    ("You know, ", 2),
    ("I mean, ", 2),
    ("Thing is, ", 1),
    ("Actually, ", 3),
    ("Funny enough, ", 1),
    ("Truth be told, ", 1),
    ("At any rate, ", 1),
    ("Anyway, ", 2),
];
