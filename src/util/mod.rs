use web_sys::console;

struct ConsoleLog;

static LOGGER: ConsoleLog = ConsoleLog;

impl log::Log for ConsoleLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let method = match record.level() {
            log::Level::Error => console::error_1,
            log::Level::Warn => console::warn_1,
            log::Level::Info => console::info_1,
            log::Level::Debug => console::debug_1,
            log::Level::Trace => console::trace_1,
        };
        (method)(
            &format!(
                "[{} {}] {}",
                record.level(),
                record.module_path().unwrap_or("?"),
                record.args()
            )
            .into(),
        );
    }

    fn flush(&self) {}
}

/// Route the `log` facade to the browser console. Safe to call twice.
pub(crate) fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        log::set_max_level(level);
    }
}

/// Lower-cased tag name of an event target, if it is an element.
pub(crate) fn event_target_tag(ev: &web_sys::Event) -> Option<String> {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.tag_name().to_lowercase())
}
