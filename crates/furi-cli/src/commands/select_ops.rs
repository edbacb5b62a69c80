use std::io::{self, BufRead};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use furi_core::speech::{self, SpeechSynthesizer, Utterance, Voice};
use furi_core::Settings;
use furi_session::{
    ButtonAction, EventTarget, PopupAction, SelectionEvent, SelectionGeometry, SelectionRuntime,
    UiResponse,
};
use tracing::info;

use super::make_annotator;

/// Prints what would be spoken instead of playing audio.
struct ConsoleSpeech {
    locale: String,
}

impl SpeechSynthesizer for ConsoleSpeech {
    fn voices(&self) -> Vec<Voice> {
        vec![Voice {
            name: "console".to_string(),
            locale: self.locale.clone(),
        }]
    }

    fn speak(&self, utterance: &Utterance, voice: Option<&Voice>) {
        println!(
            "[speak {} x{:.1} via {}] {}",
            utterance.locale,
            utterance.rate,
            voice.map(|v| v.name.as_str()).unwrap_or("default"),
            utterance.text
        );
    }
}

/// Human-readable lines for the surface changes in a response.
pub fn describe_response(resp: &UiResponse) -> Vec<String> {
    let mut lines = Vec::new();
    match &resp.button {
        ButtonAction::Keep => {}
        ButtonAction::Show(p) => lines.push(format!("[button at {:.0},{:.0}]", p.x, p.y)),
        ButtonAction::Hide => lines.push("[button hidden]".to_string()),
    }
    match &resp.popup {
        PopupAction::Keep => {}
        PopupAction::Loading { message, .. } => lines.push(format!("[popup] {message}")),
        PopupAction::Show { html, .. } => lines.push(format!("[popup] {html}")),
        PopupAction::Hide => lines.push("[popup hidden]".to_string()),
    }
    lines
}

/// Handle one input line. Returns the lines to print, or `None` on `:quit`.
pub fn handle_line(
    runtime: &mut SelectionRuntime,
    synth: &dyn SpeechSynthesizer,
    wait_for: Duration,
    line: &str,
) -> Option<Vec<String>> {
    let mut out = Vec::new();
    match line.trim() {
        ":quit" => return None,
        ":dismiss" => out.extend(describe_response(&runtime.dispatch(
            SelectionEvent::PointerDown {
                target: EventTarget::Page,
            },
        ))),
        ":speak" => match runtime.dispatch(SelectionEvent::SpeakRequested).speak {
            Some(utterance) => speech::speak(synth, &utterance),
            None => out.push("[nothing to speak]".to_string()),
        },
        text => {
            let resp = runtime.dispatch(SelectionEvent::SelectionEnd {
                text: text.to_string(),
                geometry: SelectionGeometry::default(),
                target: EventTarget::Page,
            });
            out.extend(describe_response(&resp));
            if !matches!(resp.button, ButtonAction::Show(_)) {
                return Some(out);
            }
            let resp = runtime.dispatch(SelectionEvent::TriggerActivated {
                text: text.to_string(),
            });
            out.extend(describe_response(&resp));
            if resp.request.is_some() {
                match runtime.wait(wait_for) {
                    Some(resp) => out.extend(describe_response(&resp)),
                    None => out.push("[no answer]".to_string()),
                }
            }
        }
    }
    Some(out)
}

/// Interactive loop: every stdin line is treated as a fresh selection that is
/// immediately annotated through the trigger. `:speak`, `:dismiss` and `:quit`
/// act on the popup.
pub fn select_cmd(settings: &Settings) {
    let annotator = Arc::new(make_annotator(settings));
    let mut runtime = die!(
        SelectionRuntime::new(annotator, settings),
        "Error starting annotation worker: {}"
    );
    let synth = ConsoleSpeech {
        locale: settings.speech.locale.clone(),
    };
    let wait_for = settings.service.timeout() + Duration::from_secs(1);
    info!(base_url = %settings.service.base_url, "selection loop start");

    for line in io::stdin().lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        let Some(output) = handle_line(&mut runtime, &synth, wait_for, &line) else {
            break;
        };
        for line in output {
            println!("{line}");
        }
    }
}
