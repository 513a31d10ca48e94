//! Compiled-in word tables for the compound polarity scorer.
//!
//! Valences sit on a `-4.0..=4.0` scale. Bump [`LEXICON_VERSION`] whenever a
//! weight changes. Every cached score records the version that produced it.

pub const LEXICON_VERSION: &str = "2024.1";

pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("accelerate", 1.3),
    ("accelerates", 1.3),
    ("accomplish", 1.8),
    ("achievement", 2.1),
    ("advance", 1.3),
    ("advances", 1.3),
    ("agree", 1.5),
    ("amazing", 2.8),
    ("approval", 2.0),
    ("approved", 1.8),
    ("attractive", 1.9),
    ("award", 2.5),
    ("awesome", 3.1),
    ("beat", 1.4),
    ("beats", 1.4),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("best", 3.2),
    ("better", 1.9),
    ("bonus", 2.5),
    ("boom", 1.9),
    ("boost", 1.7),
    ("boosts", 1.7),
    ("breakthrough", 2.2),
    ("bright", 1.9),
    ("brilliant", 2.8),
    ("bullish", 2.1),
    ("celebrate", 2.7),
    ("champion", 2.9),
    ("clean", 1.7),
    ("comeback", 1.5),
    ("confident", 2.2),
    ("confidence", 2.3),
    ("delight", 2.9),
    ("delighted", 3.1),
    ("dividend", 1.0),
    ("easy", 1.9),
    ("efficient", 1.8),
    ("encouraging", 2.4),
    ("excellent", 2.7),
    ("exceed", 1.4),
    ("exceeds", 1.4),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("expand", 1.3),
    ("expands", 1.3),
    ("expansion", 1.3),
    ("fantastic", 2.6),
    ("favorable", 2.1),
    ("gain", 2.0),
    ("gains", 1.8),
    ("good", 1.9),
    ("great", 3.1),
    ("grow", 1.6),
    ("growing", 1.5),
    ("growth", 1.6),
    ("happy", 2.7),
    ("healthy", 1.7),
    ("high", 0.8),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("improves", 1.8),
    ("innovative", 1.8),
    ("love", 3.2),
    ("momentum", 1.2),
    ("opportunity", 1.8),
    ("optimism", 2.5),
    ("optimistic", 2.3),
    ("outperform", 1.9),
    ("outperforms", 1.9),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("popular", 1.8),
    ("positive", 2.6),
    ("profit", 1.8),
    ("profitable", 1.9),
    ("profits", 1.5),
    ("progress", 1.8),
    ("promising", 2.0),
    ("prosper", 2.1),
    ("rally", 1.7),
    ("rallies", 1.7),
    ("rebound", 1.5),
    ("recover", 1.4),
    ("recovery", 1.4),
    ("reward", 2.0),
    ("rise", 1.1),
    ("rises", 1.1),
    ("robust", 1.6),
    ("soar", 2.1),
    ("soared", 2.1),
    ("soaring", 2.1),
    ("soars", 2.1),
    ("solid", 1.4),
    ("stable", 1.2),
    ("strength", 2.2),
    ("strong", 2.3),
    ("stronger", 2.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("surge", 1.6),
    ("surged", 1.6),
    ("surges", 1.6),
    ("surpass", 1.5),
    ("thrive", 2.4),
    ("thriving", 2.5),
    ("top", 0.8),
    ("triumph", 3.0),
    ("upbeat", 1.9),
    ("upgrade", 1.7),
    ("upgraded", 1.7),
    ("upside", 1.5),
    ("value", 1.2),
    ("win", 2.8),
    ("winner", 2.8),
    ("winning", 2.4),
    ("wins", 2.7),
    ("wonderful", 2.7),
    // Negative
    ("angry", -2.3),
    ("anxiety", -2.0),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bankrupt", -2.6),
    ("bankruptcy", -2.6),
    ("bearish", -2.0),
    ("breach", -1.9),
    ("collapse", -2.5),
    ("collapsed", -2.5),
    ("concern", -1.1),
    ("concerns", -1.1),
    ("crash", -2.6),
    ("crashed", -2.6),
    ("crisis", -3.1),
    ("cut", -1.1),
    ("cuts", -1.1),
    ("damage", -2.2),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("debt", -1.5),
    ("decline", -1.5),
    ("declined", -1.5),
    ("declines", -1.5),
    ("default", -1.8),
    ("deficit", -1.6),
    ("delay", -1.3),
    ("delayed", -1.3),
    ("disappoint", -2.0),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("downgrade", -1.7),
    ("downgraded", -1.7),
    ("downturn", -1.8),
    ("drop", -1.1),
    ("drops", -1.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fall", -1.0),
    ("falls", -1.0),
    ("fear", -2.2),
    ("fears", -1.8),
    ("fine", 0.8),
    ("fraud", -2.8),
    ("hurt", -2.4),
    ("investigation", -1.0),
    ("lawsuit", -1.9),
    ("layoff", -2.0),
    ("layoffs", -2.0),
    ("lose", -1.7),
    ("loses", -1.7),
    ("loss", -1.3),
    ("losses", -1.7),
    ("miss", -1.2),
    ("misses", -1.2),
    ("negative", -2.7),
    ("panic", -2.3),
    ("penalty", -1.8),
    ("plunge", -2.0),
    ("plunged", -2.0),
    ("plunges", -2.0),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("recall", -1.6),
    ("recession", -2.2),
    ("risk", -1.1),
    ("risks", -1.1),
    ("risky", -1.4),
    ("scandal", -2.8),
    ("selloff", -1.8),
    ("shortage", -1.5),
    ("shutdown", -2.1),
    ("slump", -1.9),
    ("slumps", -1.9),
    ("struggle", -1.8),
    ("struggles", -1.7),
    ("sue", -1.6),
    ("sued", -1.6),
    ("terrible", -2.1),
    ("threat", -2.4),
    ("trouble", -1.7),
    ("tumble", -1.8),
    ("tumbles", -1.8),
    ("uncertain", -1.2),
    ("uncertainty", -1.4),
    ("unstable", -1.5),
    ("volatile", -1.1),
    ("warning", -1.4),
    ("weak", -1.9),
    ("weaker", -1.9),
    ("weakness", -1.8),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("writedown", -1.6),
];

/// Intensifiers (positive) and dampeners (negative). They carry no valence
/// of their own and only scale the word that follows.
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("greatly", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("massively", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("sharply", B_INCR),
    ("significantly", B_INCR),
    ("so", B_INCR),
    ("strongly", B_INCR),
    ("substantially", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("modestly", B_DECR),
    ("partly", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
];

pub(crate) const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt", "hasnt",
    "havent", "isnt", "neither", "never", "no", "nobody", "none", "nope", "nor", "not", "nothing",
    "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

/// Scalar added by an intensifier.
pub(crate) const B_INCR: f64 = 0.293;
/// Scalar added by a dampener.
pub(crate) const B_DECR: f64 = -0.293;
