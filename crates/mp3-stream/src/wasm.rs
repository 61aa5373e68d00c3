//! WebAssembly bindings.
//!
//! Exposes one [`Session`] per JS object through wasm-bindgen. The surface
//! keeps the "set parameters, call action, read result fields" shape so a
//! host can drive it without allocating JS objects per call:
//!
//! ```js
//! const dec = new WasmDecoder();
//! dec.setInputSize(bytes.byteLength);
//! new Uint8Array(wasmMemory().buffer, dec.inputBase(), dec.inputSize()).set(bytes);
//! dec.decode(10.0);
//! const pcm = new Int16Array(wasmMemory().buffer, dec.pcmBase(), dec.pcmSize() / 2);
//! ```
//!
//! `inputBase()` stays fixed while the arena is inside its reservation, so
//! a host may also write the stream first (`reserveInput`) and declare its
//! size afterwards. Any `memory.grow` still detaches earlier `ArrayBuffer`
//! views; re-create views from `wasmMemory().buffer` after every call.

use alloc::vec::Vec;
use wasm_bindgen::prelude::*;

use crate::config::SEEK_TO_END;
use crate::mp3_decoder::NanoMp3Decoder;
use crate::session::Session;

/// Route `tracing` events to the browser console.
///
/// Call once at startup. Later calls are ignored.
#[wasm_bindgen(js_name = enableConsoleLogging)]
pub fn enable_console_logging() {
    // Err means a subscriber is already installed; repeat calls are expected.
    tracing_wasm::try_set_as_global_default().ok();
}

/// The module's linear memory, for building views over the regions.
#[wasm_bindgen(js_name = wasmMemory)]
pub fn wasm_memory() -> JsValue {
    wasm_bindgen::memory()
}

/// Crate version.
#[wasm_bindgen(js_name = decoderVersion)]
pub fn decoder_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

/// JavaScript-accessible MP3 decoder session.
#[wasm_bindgen]
pub struct WasmDecoder {
    session: Session<NanoMp3Decoder>,
}

#[wasm_bindgen]
impl WasmDecoder {
    /// Create a session with an initialised codec and an empty arena.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::new(NanoMp3Decoder::new()),
        }
    }

    /// Discard codec look-ahead state.
    pub fn init(&mut self) {
        self.session.init();
    }

    /// Declare the size of the stream written at `inputBase()`.
    #[wasm_bindgen(js_name = setInputSize)]
    pub fn set_input_size(&mut self, size: usize) {
        self.session.set_input_size(size);
    }

    /// Make room for `size` input bytes at `inputBase()` without declaring
    /// them; call `setInputSize` after writing.
    #[wasm_bindgen(js_name = reserveInput)]
    pub fn reserve_input(&mut self, size: usize) {
        self.session.reserve_input(size);
    }

    /// Copy `data` into the input region, replacing the current stream.
    #[wasm_bindgen(js_name = loadBytes)]
    pub fn load_bytes(&mut self, data: &js_sys::Uint8Array) {
        let len = usize::try_from(data.length()).unwrap_or(usize::MAX);
        self.session.set_input_size(len);
        data.copy_to(self.session.input_mut());
    }

    /// Seek to `position` seconds (negative: end) and return the position
    /// reached.
    pub fn seek(&mut self, position: f64) -> f64 {
        self.session.seek(position);
        self.session.current_time()
    }

    /// Seek to the end and report the stream duration, then rewind.
    #[wasm_bindgen(js_name = measureDuration)]
    pub fn measure_duration(&mut self) -> f64 {
        let duration = self.session.seek(SEEK_TO_END).duration;
        self.session.seek(0.0);
        duration
    }

    /// Decode up to `duration` seconds from the current position.
    pub fn decode(&mut self, duration: f64) {
        self.session.decode(duration);
    }

    /// Copy of the last decode's samples.
    #[wasm_bindgen(js_name = pcmSamples)]
    pub fn pcm_samples(&self) -> Vec<i16> {
        self.session.pcm_samples().collect()
    }

    // ── Result fields ───────────────────────────────────────────────────────

    /// Samples from the last call, summed across channels.
    #[wasm_bindgen(js_name = numSamples)]
    pub fn num_samples(&self) -> usize {
        self.session.num_samples()
    }

    /// Input bytes consumed by the last call.
    #[wasm_bindgen(js_name = numBytes)]
    pub fn num_bytes(&self) -> usize {
        self.session.num_bytes()
    }

    /// Sample rate seen by the last call.
    #[wasm_bindgen(js_name = samplingRate)]
    pub fn sampling_rate(&self) -> u32 {
        self.session.sampling_rate()
    }

    /// Channel count seen by the last call.
    #[wasm_bindgen(js_name = numChannels)]
    pub fn num_channels(&self) -> u8 {
        self.session.num_channels()
    }

    /// Seconds covered by the last call.
    pub fn duration(&self) -> f64 {
        self.session.duration()
    }

    /// Stop status of the last call (see `WalkStop::code`).
    #[wasm_bindgen(js_name = lastStop)]
    pub fn last_stop(&self) -> u32 {
        self.session.last_stop().code()
    }

    // ── State fields ────────────────────────────────────────────────────────

    /// Cumulative seconds consumed.
    #[wasm_bindgen(js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.session.current_time()
    }

    /// Input bytes consumed.
    #[wasm_bindgen(js_name = byteOffset)]
    pub fn byte_offset(&self) -> usize {
        self.session.byte_offset()
    }

    /// Address of the input region in linear memory.
    #[wasm_bindgen(js_name = inputBase)]
    pub fn input_base(&self) -> *const u8 {
        self.session.input_base()
    }

    /// Bytes of compressed data loaded.
    #[wasm_bindgen(js_name = inputSize)]
    pub fn input_size(&self) -> usize {
        self.session.input_size()
    }

    /// Address of the PCM region in linear memory.
    #[wasm_bindgen(js_name = pcmBase)]
    pub fn pcm_base(&self) -> *const u8 {
        self.session.pcm_base()
    }

    /// Bytes of PCM from the last decode.
    #[wasm_bindgen(js_name = pcmSize)]
    pub fn pcm_size(&self) -> usize {
        self.session.pcm_size()
    }
}

impl Default for WasmDecoder {
    fn default() -> Self {
        Self::new()
    }
}
