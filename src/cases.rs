use crate::predicate::{Predicate, TAMIL};

/// Whether a case expects the oracle to transliterate its input or to
/// leave it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Positive,
    Negative,
}

/// One suite case: an input for the oracle and the verdict on its output.
///
/// Cases are immutable and independent: a check only ever sees the single
/// output string the oracle produced for this case's input.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub id: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub input: &'static str,
    pub check: Predicate,
}

fn positive(id: &'static str, label: &'static str, input: &'static str, expected: &str) -> TestCase {
    TestCase {
        id,
        label,
        category: Category::Positive,
        input,
        check: Predicate::exact_substring(expected),
    }
}

fn negative(id: &'static str, label: &'static str, input: &'static str) -> TestCase {
    TestCase {
        id,
        label,
        category: Category::Negative,
        input,
        check: Predicate::rejected_by(TAMIL),
    }
}

/// The full suite: 25 positive and 10 negative cases.
pub fn suite_cases() -> Vec<TestCase> {
    vec![
        positive(
            "pos-01",
            "Simple greeting question",
            "vanakkam epdi irukka?",
            "வணக்கம் எப்படி இருக்க?",
        ),
        positive(
            "pos-02",
            "Short polite request",
            "konjam help pannunga",
            "கொஞ்சம் ஹெல்ப் பண்ணுங்க",
        ),
        positive(
            "pos-03",
            "Present tense daily activity",
            "naan office ku poren",
            "நான் ஆபிஸ் கு போறேன்",
        ),
        positive(
            "pos-04",
            "Past tense simple sentence",
            "naan nethu padichuten",
            "நான் நேத்து படிச்சுட்டேன்",
        ),
        positive(
            "pos-05",
            "Future tense plan",
            "nalai party ku porom",
            "நாளை பார்ட்டி கு போறோம்",
        ),
        positive(
            "pos-06",
            "Negative sentence form",
            "enakku time illa",
            "எனக்கு டைம் இல்ல",
        ),
        positive(
            "pos-07",
            "Compound sentence two ideas",
            "naan sapiduven appuram padipen",
            "நான் சாப்பிடுவேன் அப்புறம் படிப்பேன்",
        ),
        positive(
            "pos-08",
            "Complex conditional",
            "mazhai vandha velaiku pogala",
            "மழை வந்தா வேலைக்கு போகல",
        ),
        positive(
            "pos-09",
            "Plural pronoun variation",
            "naanga ellam ready ah irukkom",
            "நாங்க எல்லாம் ரெடி ஆ இருக்கோம்",
        ),
        positive(
            "pos-10",
            "Mixed English tech terms",
            "Zoom call la OTP anupunga email ku",
            "ஜூம் கால் ல ஓடிபி அனுப்புங்க ஈமெயில் கு",
        ),
        positive(
            "pos-11",
            "Place name and common English",
            "Colombo la irukura new cafe super ah irukku",
            "கொழும்பு ல இருக்குற நியூ கேஃப் சூப்பர் ஆ இருக்கு",
        ),
        positive(
            "pos-12",
            "Slang informal greeting",
            "machi superrr da",
            "மச்சி சூப்பர்ர் டா",
        ),
        positive(
            "pos-13",
            "Repeated emphasis words",
            "nalla nalla irukku",
            "நல்ல நல்ல இருக்கு",
        ),
        // Date token must pass through untouched while the surrounding
        // words still get transliterated.
        TestCase {
            id: "pos-14",
            label: "Date token preserved in sentence",
            category: Category::Positive,
            input: "exam 2026-03-15 anikku nadakkum",
            check: Predicate::AllOf(vec![
                Predicate::ScriptPresence(TAMIL),
                Predicate::exact_substring("2026-03-15"),
            ]),
        },
        positive(
            "pos-15",
            "Date format preserved",
            "birthday 15-03-2026",
            "பர்த்டே 15-03-2026",
        ),
        positive(
            "pos-16",
            "Polite high degree request",
            "thayaavu seidhu enakku ivalavu help pannunga",
            "தயவு செய்து எனக்கு இவ்வளவு ஹெல்ப் பண்ணுங்க",
        ),
        positive(
            "pos-17",
            "Multi-word phrase pattern",
            "konjam wait pannu",
            "கொஞ்சம் வெயிட் பண்ணு",
        ),
        TestCase {
            id: "pos-18",
            label: "Proper spaced long sentence",
            category: Category::Positive,
            input: "Intha weekend naan friends oda Kandy trip plan pannuraen morning early \
                    bus la porom paththu mani neram journey irukku temple botanical garden \
                    pathu evening hotel rest next day Nuwara Eliya poga plan weather mazhai \
                    nu sollirukku so umbrella kondu porom everyone excited",
            check: Predicate::case_insensitive_substring(
                "இந்த வீக்எண்ட் நான் ஃப்ரெண்ட்ஸ் ஓட கண்டி ட்ரிப் பிளான் பண்றேன் மார்னிங் அர்லி பஸ் ல \
                 போறோம் பத்து மணி நேரம் ஜர்னி இருக்கு டெம்பிள் போட்டானிக்கல் கார்டன் பாத்து ஈவ்னிங் \
                 ஹோட்டல் ரெஸ்ட் நெக்ஸ்ட் டே நுவார எலியா போக பிளான் வெதர் மழை னு சொல்லிருக்கு சோ \
                 அம்ப்ரெல்லா கொண்டு போறோம்",
            ),
        },
        positive(
            "pos-19",
            "Informal response",
            "seri da aprm pesuvom",
            "சரி டா அப்புறம் பேசுவோம்",
        ),
        positive(
            "pos-20",
            "Singular pronoun focus",
            "nee eppadi irukka?",
            "நீ எப்படி இருக்க?",
        ),
        positive(
            "pos-21",
            "Mixed abbreviation short forms",
            "PIN OTP QR code ASAP ETA send pannu",
            "பின் ஓடிபி க்யூஆர் கோட் அஸாப் ஈடிஏ செண்ட் பண்ணு",
        ),
        positive(
            "pos-22",
            "Very polite formal request",
            "dayavu seidhu enakku idhai explain pannunga",
            "தயவு செய்து எனக்கு இதை எக்ஸ்பிளெயின் பண்ணுங்க",
        ),
        positive(
            "pos-23",
            "Day-to-day expression",
            "thookkam varudhu da",
            "தூக்கம் வருது டா",
        ),
        positive(
            "pos-24",
            "Joined proper spacing",
            "naan veetukku poren and friends oda meet pannuven",
            "நான் வீட்டுக்கு போறேன் அண்ட் ஃப்ரெண்ட்ஸ் ஓட மீட் பண்ணுவேன்",
        ),
        positive(
            "pos-25",
            "Output updates after submission",
            "vanakkam da",
            "வணக்கம் டா",
        ),
        // Words joined without spacing defeat the word-by-word engine
        // entirely: the oracle is expected to produce nothing at all.
        TestCase {
            id: "neg-01",
            label: "Joined words without spaces",
            category: Category::Negative,
            input: "naanveetukkuvittuponen",
            check: Predicate::EmptyOutput,
        },
        negative("neg-02", "Tab characters only", "\t\t\t\t"),
        negative(
            "neg-03",
            "Punctuation overload",
            "machan!!!! enna da panra?????",
        ),
        negative(
            "neg-04",
            "Unspaced colloquial sentence",
            "naan college ku late aachu",
        ),
        negative(
            "neg-05",
            "Copy-pasted full sentence",
            "naan intha week end la friends oda movie paakaporen",
        ),
        negative(
            "neg-06",
            "Very long input with minor typos",
            "machan intha semma trip plan pannirukken kandy ku bus la morning 6 am start \
             pannuvom pathu mani neram journey temple botanical garden hanthana view \
             evening hotel rest next day nuwara eliya mazhai forecast umbrella kondu porom \
             friends zoom la discuss panninom super excited",
        ),
        negative(
            "neg-07",
            "Foreign vocabulary outside Tamil phonetics",
            "naan hari lassan venum",
        ),
        negative(
            "neg-08",
            "Unusual symbols mixed in",
            "ticket $50 @movie #super %100 off",
        ),
        negative("neg-09", "Single space only", " "),
        negative(
            "neg-10",
            "Truncated leading word",
            "anakkam da naan busy irukken call pannuren",
        ),
    ]
}
