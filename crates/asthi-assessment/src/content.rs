use serde::{Deserialize, Serialize};
use ts_rs::TS;

use asthi_core::models::language::Language;

use crate::tier::RiskTier;

/// A training video on the external host (YouTube).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VideoRef {
    pub id: u32,
    pub youtube_id: String,
    pub title: String,
}

impl VideoRef {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.youtube_id)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", self.youtube_id)
    }
}

/// Everything shown to the patient for a tier, resolved to one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContentBundle {
    pub title: String,
    pub description: String,
    pub videos: Vec<VideoRef>,
}

struct Localized {
    en: &'static str,
    hi: &'static str,
}

impl Localized {
    fn get(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Hi => self.hi,
        }
    }
}

struct Video {
    id: u32,
    youtube_id: &'static str,
    title: Localized,
}

struct TierContent {
    title: Localized,
    description: Localized,
    videos: [Video; 3],
}

static NEEDS_ATTENTION: TierContent = TierContent {
    title: Localized {
        en: "Phase 1 - Needs Attention",
        hi: "चरण 1 - ध्यान देने की जरूरत",
    },
    description: Localized {
        en: "Your indicators suggest sarcopenia risk. Start with gentle, beginner exercises and consult a healthcare provider.",
        hi: "आपके संकेतक सार्कोपेनिया जोखिम का सुझाव देते हैं। हल्के, शुरुआती व्यायाम से शुरू करें और स्वास्थ्य सेवा प्रदाता से परामर्श करें।",
    },
    videos: [
        Video {
            id: 1,
            youtube_id: "aUaInS6HIGo",
            title: Localized {
                en: "Beginner Chair Exercises",
                hi: "शुरुआती कुर्सी व्यायाम",
            },
        },
        Video {
            id: 2,
            youtube_id: "5N1JxDpT-wk",
            title: Localized {
                en: "Gentle Stretching Routine",
                hi: "हल्की स्ट्रेचिंग दिनचर्या",
            },
        },
        Video {
            id: 3,
            youtube_id: "PFkDJI64zAk",
            title: Localized {
                en: "Balance Training Basics",
                hi: "संतुलन प्रशिक्षण की मूल बातें",
            },
        },
    ],
};

static MODERATE_CONCERN: TierContent = TierContent {
    title: Localized {
        en: "Phase 2 - Moderate Concern",
        hi: "चरण 2 - मध्यम चिंता",
    },
    description: Localized {
        en: "Some indicators suggest moderate muscle weakness. Intermediate exercises and consistent training are recommended.",
        hi: "कुछ संकेतक मध्यम मांसपेशी कमजोरी का सुझाव देते हैं। मध्यवर्ती व्यायाम और लगातार प्रशिक्षण की सिफारिश की जाती है।",
    },
    videos: [
        Video {
            id: 4,
            youtube_id: "uGEL8lmZFXc",
            title: Localized {
                en: "Resistance Band Workouts",
                hi: "रेजिस्टेंस बैंड वर्कआउट",
            },
        },
        Video {
            id: 5,
            youtube_id: "GIBXMIoGXWU",
            title: Localized {
                en: "Core Strengthening Exercises",
                hi: "कोर स्ट्रेंथनिंग एक्सरसाइज",
            },
        },
        Video {
            id: 6,
            youtube_id: "T6Se7kOJdSQ",
            title: Localized {
                en: "Walking Program Guide",
                hi: "वॉकिंग प्रोग्राम गाइड",
            },
        },
    ],
};

static GOOD_CONDITION: TierContent = TierContent {
    title: Localized {
        en: "Phase 3 - Good Condition",
        hi: "चरण 3 - अच्छी स्थिति",
    },
    description: Localized {
        en: "Your muscle health indicators are in a good range. Focus on maintaining and building strength with advanced exercises.",
        hi: "आपके मांसपेशी स्वास्थ्य संकेतक अच्छी श्रेणी में हैं। उन्नत व्यायाम के साथ ताकत बनाए रखने और बढ़ाने पर ध्यान दें।",
    },
    videos: [
        Video {
            id: 7,
            youtube_id: "4J9G8eWu5Is",
            title: Localized {
                en: "Weight Training for Bone Health",
                hi: "हड्डी स्वास्थ्य के लिए वेट ट्रेनिंग",
            },
        },
        Video {
            id: 8,
            youtube_id: "RLHdkV8WWQI",
            title: Localized {
                en: "High-Intensity Interval Training",
                hi: "हाई-इंटेंसिटी इंटरवल ट्रेनिंग",
            },
        },
        Video {
            id: 9,
            youtube_id: "bSvovGB_O44",
            title: Localized {
                en: "Advanced Balance & Agility",
                hi: "एडवांस्ड बैलेंस और एजिलिटी",
            },
        },
    ],
};

pub(crate) fn bundle_for(tier: RiskTier, language: Language) -> ContentBundle {
    let content = match tier {
        RiskTier::NeedsAttention => &NEEDS_ATTENTION,
        RiskTier::ModerateConcern => &MODERATE_CONCERN,
        RiskTier::GoodCondition => &GOOD_CONDITION,
    };

    ContentBundle {
        title: content.title.get(language).to_string(),
        description: content.description.get(language).to_string(),
        videos: content
            .videos
            .iter()
            .map(|v| VideoRef {
                id: v.id,
                youtube_id: v.youtube_id.to_string(),
                title: v.title.get(language).to_string(),
            })
            .collect(),
    }
}
