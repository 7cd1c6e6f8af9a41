//! Template families. Each renders a complete instruction string around a
//! subject phrase substituted verbatim.

const CANVAS_RULES: &str = "SVG rules: use width=\"300\" height=\"300\" and viewBox=\"0 0 300 300\". \
Start with a full-size black background: <rect width=\"300\" height=\"300\" fill=\"black\"/>. \
Draw everything else in white (stroke=\"white\" or fill=\"white\") with no other colors. \
Only use these elements: svg, g, rect, circle, ellipse, line, polyline, polygon, path, text. \
Text must use font-family=\"sans-serif\", font-weight=\"bold\" and a font-size of at least 24. \
No <style>, <script>, <image>, gradients, filters or external references.";

const OUTPUT_RULES: &str = "The SVG must be self-contained, starting with <svg and ending with </svg>. \
Do not include markdown formatting or code blocks. Just the raw JSON string.";

pub(super) fn rebus(subject: &str) -> String {
    format!(
        "Generate a JSON object with two fields: 'word' (the answer to the puzzle, which should be \
a common phrase, idiom, or compound word related to {subject}) and 'svg' (an SVG code string \
representing a visual puzzle or rebus for that answer. The puzzle should use a combination of \
simple icons/drawings and text/letters to represent the answer visually. Use bright/white lines \
on a transparent or black background so it is visible on a dark theme, inside a 300x300 viewBox). \
{OUTPUT_RULES}"
    )
}

pub(super) fn monochrome(subject: &str) -> String {
    format!(
        "You design rebus puzzles. Pick a well-known phrase, idiom, or compound word related to \
{subject}. Return a JSON object with exactly two string fields: \"word\" (the phrase) and \"svg\" \
(SVG markup that encodes the phrase as a rebus using simple shapes, positions, and a few \
letters, never spelling the answer outright). {CANVAS_RULES} {OUTPUT_RULES}"
    )
}

pub(super) fn riddle(subject: &str) -> String {
    format!(
        "Create a visual riddle. Choose a short phrase or idiom related to {subject} as the \
answer. Return a JSON object with exactly two string fields: \"word\" (the answer) and \"svg\" \
(SVG markup showing two to four clue symbols arranged left to right, optionally joined by \
+ or - signs or short letter fragments, so that reading the clues in order leads to the \
answer). {CANVAS_RULES} {OUTPUT_RULES}"
    )
}

pub(super) fn surprise(subject: &str) -> String {
    format!(
        "Invent a fresh rebus puzzle about {subject}. Choose a common phrase, idiom, or compound \
word that fits that subject and avoid the most obvious choice. Return a JSON object with exactly \
two string fields: \"word\" (the answer) and \"svg\" (SVG markup depicting the answer as a rebus \
built from simple drawings and letters). {CANVAS_RULES} {OUTPUT_RULES}"
    )
}
