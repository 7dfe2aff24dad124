//! Roast commentary. Purely cosmetic: nothing here feeds back into scores.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::scores::Grade;
use crate::types::Category;

// 95-100
const HIGH_SCORE_ROASTS: &[&str] = &[
    "Okay, this is actually fire. Respect. 🔥",
    "Chef's kiss. Someone knows what they're doing. 👨‍🍳",
    "I'd hire whoever built this. Outstanding work.",
    "Finally! A website that doesn't make me want to cry.",
    "This is so good, I'm suspicious. What's the catch?",
    "Plot twist: this website is actually good!",
];

// 80-94
const GOOD_SCORE_ROASTS: &[&str] = &[
    "Not bad, not bad. Your SEO person deserves a raise.",
    "Solid B+. You're in the top 20% of websites I've seen today.",
    "This is like a decent restaurant meal. Won't win awards, but won't make you sick.",
    "Pretty good! Just a few rough edges to polish.",
    "I see potential here. A few tweaks and this could be great.",
    "Acceptable. Which is high praise coming from me.",
];

// 60-79
const MID_SCORE_ROASTS: &[&str] = &[
    "Mid. Just... mid. Your website is the plain oatmeal of the internet.",
    "It's giving 'we did the bare minimum' vibes.",
    "Not terrible, but also not memorable. Like elevator music.",
    "Your website is the human equivalent of lukewarm coffee.",
    "I've seen worse. But I've also seen a lot better.",
    "This is the 'participation trophy' of websites.",
    "Functional, but about as exciting as a tax form.",
];

// 40-59
const LOW_SCORE_ROASTS: &[&str] = &[
    "Yikes. Did an intern build this during their lunch break?",
    "This website has commitment issues. And by commitment, I mean committing to quality.",
    "I've seen more effort put into a 'coming soon' page.",
    "Your website is like a salad at a steakhouse: technically there, but why?",
    "Bold strategy making everything mediocre. Let's see if it pays off.",
    "This needs work. Like, 'pull an all-nighter' level work.",
];

// 20-39
const BAD_SCORE_ROASTS: &[&str] = &[
    "I've seen better websites on GeoCities in 1998.",
    "This website is so slow, I aged 5 years waiting for it to load.",
    "Did you build this in Notepad... during a power outage?",
    "Your SEO is hiding like my motivation on a Monday morning.",
    "This site has more issues than a celebrity tabloid.",
    "Calling this 'unfinished' would be generous.",
    "Your website just asked me if it could copy my homework.",
];

// 0-19
const DISASTER_ROASTS: &[&str] = &[
    "This isn't a website. This is a cry for help. 💀",
    "I've seen error pages with more effort than this.",
    "Congratulations, you've achieved '404 personality'.",
    "This website is the digital equivalent of a dumpster fire.",
    "I'm not saying your website is bad, but... actually yes I am. It's bad.",
    "Burn it down and start over. Trust me on this one.",
    "Your website called and asked if it could borrow some self-respect.",
    "If websites could feel shame, this one would need therapy.",
];

/// Roast pool per comment band, see [`comment_band`].
const SCORE_POOLS: [&[&str]; 6] = [
    HIGH_SCORE_ROASTS,
    GOOD_SCORE_ROASTS,
    MID_SCORE_ROASTS,
    LOW_SCORE_ROASTS,
    BAD_SCORE_ROASTS,
    DISASTER_ROASTS,
];

const SERIOUS_COMMENTS: [&str; 6] = [
    "Excellent. This category meets or exceeds best practices.",
    "Good. Minor improvements could push this to excellent.",
    "Acceptable. Some issues present but functional.",
    "Below average. Several issues need attention.",
    "Poor. Significant problems affecting this category.",
    "Critical. Immediate attention required for this area.",
];

/// Index into the per-band tables, best band first.
fn comment_band(score: u8) -> usize {
    match score {
        95..=u8::MAX => 0,
        80..=94 => 1,
        60..=79 => 2,
        40..=59 => 3,
        20..=39 => 4,
        _ => 5,
    }
}

fn grade_roasts(grade: Grade) -> &'static [&'static str] {
    match grade {
        Grade::APlus => &[
            "Absolutely flawless. Are you sure you didn't cheat?",
            "I'm genuinely impressed. Take my money already!",
        ],
        Grade::A => &[
            "Excellent work! Someone actually cares about quality.",
            "Top tier website. You should be proud (and I don't say that often).",
        ],
        Grade::AMinus => &[
            "So close to perfect! Just a tiny bit more polish needed.",
            "Great job! The A- student who could easily be an A+.",
        ],
        Grade::BPlus => &[
            "Very solid effort. Above average in a sea of mediocrity.",
            "Good work! You're in the honors program of web development.",
        ],
        Grade::B => &[
            "Respectable B-tier website. Not exceptional, but competent.",
            "Decent job. You're passing with style.",
        ],
        Grade::BMinus => &[
            "Average with ambition. I see what you're trying to do.",
            "You're on the right track, just keep improving.",
        ],
        Grade::CPlus => &[
            "Slightly above average. The participation trophy of grades.",
            "Meh-plus. It's trying, I'll give it that.",
        ],
        Grade::C => &[
            "Definition of 'fine, I guess'. The vanilla ice cream of websites.",
            "Perfectly average. Not good, not bad, just... there.",
        ],
        Grade::CMinus => &[
            "Below average. Like getting a C- in 'Introduction to Breathing'.",
            "Needs significant improvement. Back to the drawing board.",
        ],
        Grade::DPlus => &[
            "Barely passing. Your website is one missed assignment away from failing.",
            "This is what 'doing the minimum' looks like.",
        ],
        Grade::D => &[
            "Failing but trying. Points for effort, I suppose.",
            "This needs serious work. Like, hire-a-professional serious.",
        ],
        Grade::DMinus => &[
            "Almost failing. Your website is holding on by a thread.",
            "Critical condition. Call a developer ASAP.",
        ],
        Grade::F => &[
            "Complete failure. This website is an insult to the internet.",
            "F stands for 'Find a new web developer'. Immediately.",
        ],
    }
}

/// `(low, mid)` context lines: low applies below 40, mid below 70.
fn category_contexts(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::Title => (
            "Your title is so bad, even the browser tab is embarrassed.",
            "Title exists but it's as exciting as 'Document1.doc'.",
        ),
        Category::MetaDescription => (
            "No meta description? Google will just make something up. Probably about hamsters.",
            "Your meta description is the literary equivalent of elevator music.",
        ),
        Category::Headings => (
            "Heading structure is a disaster. It's like a book with random chapter numbers.",
            "Your headings exist, which is the bare minimum. Congratulations on doing the bare minimum.",
        ),
        Category::Images => (
            "Images without alt text are just digital decorations for sighted people. Rude.",
            "Some images have alt text. The rest are just guessing games for screen readers.",
        ),
        Category::Mobile => (
            "Not mobile-friendly? What year is this, 2007?",
            "Sort of works on mobile. Like how a shoe sort of works as a hammer.",
        ),
        Category::SslSecurity => (
            "No HTTPS? Your users' data is basically postcards in the mail.",
            "You have HTTPS, but your security headers are taking a nap.",
        ),
        Category::Performance => (
            "This site is so slow, I made coffee while waiting for it to load.",
            "Not the fastest, but hey, patience is a virtue, right?",
        ),
        Category::Links => (
            "Link structure is a maze with no exit. Good luck, users!",
            "Links work, but they could be better organized.",
        ),
        Category::OpenGraph => (
            "No Open Graph? Your social shares will look like sad text messages.",
            "Basic social tags present. Could use more flair for sharing.",
        ),
        Category::Schema => (
            "No structured data. Google is playing guessing games with your content.",
            "Some schema markup. Enough to get by, not enough to excel.",
        ),
    }
}

/// Generates commentary for scores and grades.
///
/// In serious mode every output is deterministic; in roast mode lines are
/// drawn uniformly from fixed pools using `R`.
pub struct Roaster<R: Rng = ThreadRng> {
    serious: bool,
    rng: R,
}

impl Roaster<ThreadRng> {
    pub fn new(serious: bool) -> Self {
        Self::with_rng(serious, rand::thread_rng())
    }
}

impl<R: Rng> Roaster<R> {
    /// Roaster drawing from a caller-supplied RNG (seed it for stable output).
    pub fn with_rng(serious: bool, rng: R) -> Self {
        Self { serious, rng }
    }

    /// One-line comment for a category score.
    pub fn comment(&mut self, score: u8, _category: Category) -> &'static str {
        let band = comment_band(score);
        if self.serious {
            return SERIOUS_COMMENTS[band];
        }
        self.pick(SCORE_POOLS[band])
    }

    /// Summary line for the overall grade.
    pub fn overall(&mut self, grade: Grade, score: u8) -> String {
        if self.serious {
            return format!("Overall Score: {score}/100 (Grade: {grade})");
        }
        self.pick(grade_roasts(grade)).to_string()
    }

    /// Extra roast line for weak categories; empty in serious mode or at 70+.
    pub fn category_context(&self, category: Category, score: u8) -> &'static str {
        if self.serious {
            return "";
        }
        let (low, mid) = category_contexts(category);
        match score {
            0..=39 => low,
            40..=69 => mid,
            _ => "",
        }
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or("")
    }
}
