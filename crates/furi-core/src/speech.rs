//! Text-to-speech contract. Playback belongs to the host; the pipeline only
//! builds the utterance and picks a voice, then fires and forgets.

use tracing::debug;

use crate::settings::SpeechSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. `ja-JP`.
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    pub rate: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, settings: &SpeechSettings) -> Self {
        Self {
            text: text.into(),
            locale: settings.locale.clone(),
            rate: settings.rate,
        }
    }
}

pub trait SpeechSynthesizer {
    fn voices(&self) -> Vec<Voice>;

    /// Start speaking; must not block on playback.
    fn speak(&self, utterance: &Utterance, voice: Option<&Voice>);
}

fn canonical(locale: &str) -> String {
    locale.replace('_', "-").to_ascii_lowercase()
}

fn language(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Exact locale match first, then any voice of the same language.
pub fn pick_voice<'a>(voices: &'a [Voice], locale: &str) -> Option<&'a Voice> {
    let wanted = canonical(locale);
    voices
        .iter()
        .find(|v| canonical(&v.locale) == wanted)
        .or_else(|| {
            let lang = language(locale).to_ascii_lowercase();
            voices
                .iter()
                .find(|v| language(&v.locale).eq_ignore_ascii_case(&lang))
        })
}

pub fn speak(synth: &dyn SpeechSynthesizer, utterance: &Utterance) {
    let voices = synth.voices();
    let voice = pick_voice(&voices, &utterance.locale);
    debug!(voice = voice.map(|v| v.name.as_str()), "speaking");
    synth.speak(utterance, voice);
}
