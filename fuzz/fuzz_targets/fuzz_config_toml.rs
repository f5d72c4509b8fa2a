#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and job building should never panic
        if let Ok((config, _warnings)) =
            autosync::config::parse_with_warnings(content, Path::new("autosync.toml"))
        {
            let _ = config.to_job();
            let _ = config.trigger_options();
        }
    }
});
