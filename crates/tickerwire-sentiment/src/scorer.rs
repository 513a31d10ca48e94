//! Lexicon-and-rule compound polarity scorer.
//!
//! Each token with a lexicon valence contributes that valence, adjusted by
//! preceding intensifiers, ALL-CAPS emphasis, and negation. A contrastive
//! "but" down-weights what comes before it and up-weights what follows.
//! Exclamation and repeated question marks push the sum further from zero,
//! and the sum is squashed into `[-1.0, 1.0]` with `x / sqrt(x^2 + 15)`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::lexicon::{BOOSTERS, LEXICON, LEXICON_VERSION, NEGATIONS};

const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAIM_INCR: f64 = 0.292;
const MAX_EXCLAIMS: usize = 4;
const QUESTION_INCR: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
/// How many preceding tokens an intensifier or negation can reach across.
const LOOKBACK: usize = 3;

static VALENCES: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| LEXICON.iter().copied().collect());

static BOOSTER_SCALARS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| BOOSTERS.iter().copied().collect());

/// A deterministic text-to-polarity function.
///
/// Implementations must return a value in `[-1.0, 1.0]` and must return the
/// same value for the same text.
pub trait PolarityModel: Send + Sync {
    fn polarity(&self, text: &str) -> f64;

    /// Label stored with each cached score.
    fn version(&self) -> &'static str {
        "custom"
    }
}

/// The default model: [`compound_score`] over the compiled-in lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconModel;

impl PolarityModel for LexiconModel {
    fn polarity(&self, text: &str) -> f64 {
        compound_score(text)
    }

    fn version(&self) -> &'static str {
        LEXICON_VERSION
    }
}

struct Token {
    raw: String,
    lower: String,
}

/// Compute the compound polarity of `text`.
///
/// Returns `0.0` for empty text or text with no lexicon words.
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    let cap_differential = has_cap_differential(&tokens);
    let mut valences: Vec<f64> = (0..tokens.len())
        .map(|i| token_valence(&tokens, i, cap_differential))
        .collect();
    apply_contrast(&tokens, &mut valences);

    let sum: f64 = valences.iter().sum();
    if sum.abs() < f64::EPSILON {
        return 0.0;
    }

    let emphasis = punctuation_emphasis(text);
    let total = if sum > 0.0 {
        sum + emphasis
    } else {
        sum - emphasis
    };
    normalize(total)
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|word| {
            let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
            if trimmed.is_empty() {
                None
            } else {
                Some(Token {
                    raw: trimmed.to_string(),
                    lower: trimmed.to_lowercase(),
                })
            }
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Caps only signal emphasis when the text is not shouting throughout.
fn has_cap_differential(tokens: &[Token]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(&t.raw)).count();
    caps > 0 && caps < tokens.len()
}

fn token_valence(tokens: &[Token], i: usize, cap_differential: bool) -> f64 {
    let token = &tokens[i];
    if BOOSTER_SCALARS.contains_key(token.lower.as_str()) {
        return 0.0;
    }
    let Some(&base) = VALENCES.get(token.lower.as_str()) else {
        return 0.0;
    };

    let mut valence = base;
    if cap_differential && is_all_caps(&token.raw) {
        valence += CAPS_INCR.copysign(base);
    }

    for distance in 1..=LOOKBACK.min(i) {
        let prev = &tokens[i - distance];
        if VALENCES.contains_key(prev.lower.as_str()) {
            continue;
        }
        let decay = match distance {
            1 => 1.0,
            2 => 0.95,
            _ => 0.9,
        };
        valence += booster_scalar(prev, valence, cap_differential) * decay;
    }

    if tokens[i.saturating_sub(LOOKBACK)..i]
        .iter()
        .any(|t| is_negation(&t.lower))
    {
        valence *= NEGATION_SCALAR;
    }

    valence
}

fn booster_scalar(token: &Token, valence: f64, cap_differential: bool) -> f64 {
    let Some(&scalar) = BOOSTER_SCALARS.get(token.lower.as_str()) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -scalar } else { scalar };
    if cap_differential && is_all_caps(&token.raw) {
        scalar += CAPS_INCR.copysign(valence);
    }
    scalar
}

fn is_negation(word: &str) -> bool {
    if word.ends_with("n't") || word.ends_with("n\u{2019}t") {
        return true;
    }
    let bare: String = word
        .chars()
        .filter(|&c| c != '\'' && c != '\u{2019}')
        .collect();
    NEGATIONS.contains(&bare.as_str())
}

fn apply_contrast(tokens: &[Token], valences: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= 0.5;
        } else if i > pivot {
            *v *= 1.5;
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn punctuation_emphasis(text: &str) -> f64 {
    let exclaims = text.matches('!').count().min(MAX_EXCLAIMS);
    let questions = text.matches('?').count();
    let question_emphasis = if questions > 1 {
        (questions as f64 * QUESTION_INCR).min(MAX_QUESTION_EMPHASIS)
    } else {
        0.0
    };
    exclaims as f64 * EXCLAIM_INCR + question_emphasis
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_string_returns_zero() {
        assert!(approx(compound_score(""), 0.0));
        assert!(approx(compound_score("   "), 0.0));
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert!(approx(compound_score("the quick brown fox"), 0.0));
    }

    #[test]
    fn single_word_is_normalized() {
        // great = 3.1 -> 3.1 / sqrt(3.1^2 + 15)
        let expected = 3.1 / (3.1_f64 * 3.1 + 15.0).sqrt();
        assert!(approx(compound_score("great"), expected));
    }

    #[test]
    fn positive_and_negative_words_have_matching_signs() {
        assert!(compound_score("profits surge on strong demand") > 0.0);
        assert!(compound_score("shares plunge after fraud scandal") < 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(compound_score("good") > 0.0);
        assert!(compound_score("not good") < 0.0);
        assert!(compound_score("results weren't good") < 0.0);
    }

    #[test]
    fn intensifier_increases_magnitude() {
        assert!(compound_score("very good") > compound_score("good"));
        assert!(compound_score("very bad") < compound_score("bad"));
    }

    #[test]
    fn dampener_decreases_magnitude() {
        assert!(compound_score("slightly good") < compound_score("good"));
    }

    #[test]
    fn caps_emphasis_when_text_is_mixed_case() {
        assert!(compound_score("GREAT quarter overall") > compound_score("great quarter overall"));
    }

    #[test]
    fn all_caps_text_gets_no_caps_emphasis() {
        assert!(approx(compound_score("GREAT QUARTER"), compound_score("great quarter")));
    }

    #[test]
    fn contrast_weights_the_clause_after_but() {
        assert!(compound_score("revenue was good but guidance was terrible") < 0.0);
    }

    #[test]
    fn exclamation_pushes_away_from_zero() {
        assert!(compound_score("good!!!") > compound_score("good"));
        assert!(compound_score("bad!!!") < compound_score("bad"));
    }

    #[test]
    fn score_stays_within_bounds() {
        let pos = compound_score("great excellent best love outstanding triumph win success!!!!");
        let neg = compound_score("crisis disaster worst fraud scandal collapse crash bankrupt!!!!");
        assert!(pos > 0.9 && pos <= 1.0, "got {pos}");
        assert!((-1.0..-0.9).contains(&neg), "got {neg}");
    }

    #[test]
    fn punctuation_stripped_from_words() {
        assert!(compound_score("great!") > 0.0);
        assert!(compound_score("(excellent)") > 0.0);
    }

    #[test]
    fn lexicon_model_is_deterministic() {
        let text = "Acme posts record profits despite concerns";
        let model = LexiconModel;
        assert_eq!(
            model.polarity(text).to_bits(),
            model.polarity(text).to_bits()
        );
        assert!(approx(model.polarity(text), compound_score(text)));
    }
}
