//! Browser Speech Bindings
//!
//! Speech recognition (standard or `webkit` prefixed constructor) and a
//! microphone level meter built on an `AnalyserNode`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::voice::{volume_level, RecognitionSegment};

#[wasm_bindgen]
extern "C" {
    type SpeechRecognition;

    #[wasm_bindgen(method, setter)]
    fn set_continuous(this: &SpeechRecognition, value: bool);

    #[wasm_bindgen(method, setter = interimResults)]
    fn set_interim_results(this: &SpeechRecognition, value: bool);

    #[wasm_bindgen(method, setter)]
    fn set_lang(this: &SpeechRecognition, value: &str);

    #[wasm_bindgen(method, setter)]
    fn set_onresult(this: &SpeechRecognition, handler: Option<&js_sys::Function>);

    #[wasm_bindgen(method, setter)]
    fn set_onend(this: &SpeechRecognition, handler: Option<&js_sys::Function>);

    #[wasm_bindgen(method, setter)]
    fn set_onerror(this: &SpeechRecognition, handler: Option<&js_sys::Function>);

    #[wasm_bindgen(method, catch)]
    fn start(this: &SpeechRecognition) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn stop(this: &SpeechRecognition);

    #[wasm_bindgen(method)]
    fn abort(this: &SpeechRecognition);
}

fn recognition_constructor() -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    ["SpeechRecognition", "webkitSpeechRecognition"]
        .iter()
        .filter_map(|name| js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok())
        .find(|ctor| ctor.is_function())
        .map(|ctor| ctor.unchecked_into())
}

fn get(target: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Segments from `resultIndex` to the end of a result event
fn segments_from_event(event: &JsValue) -> Vec<RecognitionSegment> {
    let results = get(event, "results");
    let start = get(event, "resultIndex").as_f64().unwrap_or(0.0) as u32;
    let len = get(&results, "length").as_f64().unwrap_or(0.0) as u32;
    (start..len)
        .filter_map(|i| js_sys::Reflect::get_u32(&results, i).ok())
        .map(|result| {
            let best = js_sys::Reflect::get_u32(&result, 0).unwrap_or(JsValue::UNDEFINED);
            RecognitionSegment {
                text: get(&best, "transcript").as_string().unwrap_or_default(),
                is_final: get(&result, "isFinal").as_bool().unwrap_or(false),
            }
        })
        .collect()
}

/// Continuous `en-US` recognizer with interim results
pub struct Recognizer {
    inner: SpeechRecognition,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

impl Recognizer {
    /// `None` when the browser has no recognition API
    pub fn new(
        mut on_result: impl FnMut(Vec<RecognitionSegment>) + 'static,
        mut on_end: impl FnMut() + 'static,
        mut on_error: impl FnMut(String) + 'static,
    ) -> Option<Self> {
        let ctor = recognition_constructor()?;
        let inner: SpeechRecognition = match js_sys::Reflect::construct(&ctor, &js_sys::Array::new()) {
            Ok(obj) => obj.unchecked_into(),
            Err(e) => {
                log::warn!("[VOICE] recognizer construction failed: {:?}", e);
                return None;
            }
        };
        inner.set_continuous(true);
        inner.set_interim_results(true);
        inner.set_lang("en-US");

        let on_result = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            on_result(segments_from_event(&event));
        });
        let on_end = Closure::<dyn FnMut(JsValue)>::new(move |_| on_end());
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let code = get(&event, "error").as_string().unwrap_or_default();
            log::warn!("[VOICE] recognition error: {}", code);
            on_error(code);
        });
        inner.set_onresult(Some(on_result.as_ref().unchecked_ref()));
        inner.set_onend(Some(on_end.as_ref().unchecked_ref()));
        inner.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Some(Self {
            inner,
            _on_result: on_result,
            _on_end: on_end,
            _on_error: on_error,
        })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.inner.start()
    }

    pub fn stop(&self) {
        self.inner.stop();
    }
}

impl Drop for Recognizer {
    fn drop(&mut self) {
        self.inner.set_onresult(None);
        self.inner.set_onend(None);
        self.inner.set_onerror(None);
        self.inner.abort();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Microphone level meter; stops on `stop()` or drop
pub struct VolumeMeter {
    ctx: AudioContext,
    stream: MediaStream,
    frame: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl VolumeMeter {
    /// Open the microphone and report levels every animation frame
    pub async fn start(on_volume: impl Fn(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = window
            .navigator()
            .media_devices()?
            .get_user_media_with_constraints(&constraints)?;
        let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;

        let ctx = AudioContext::new()?;
        let analyser: AnalyserNode = ctx.create_analyser()?;
        analyser.set_fft_size(256);
        ctx.create_media_stream_source(&stream)?
            .connect_with_audio_node(&analyser)?;

        let frame = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let mut data = vec![0u8; analyser.frequency_bin_count() as usize];

        let frame_in = frame.clone();
        let callback_in = callback.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            analyser.get_byte_frequency_data(&mut data);
            on_volume(volume_level(&data));
            if let Some(cb) = callback_in.borrow().as_ref() {
                frame_in.set(request_frame(cb));
            }
        }));
        if let Some(cb) = callback.borrow().as_ref() {
            frame.set(request_frame(cb));
        }

        Ok(Self { ctx, stream, frame, callback })
    }

    pub fn stop(&self) {
        if let (Some(id), Some(window)) = (self.frame.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference; a second stop is a no-op
        if self.callback.borrow_mut().take().is_none() {
            return;
        }
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        let _ = self.ctx.close();
    }
}

impl Drop for VolumeMeter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}
