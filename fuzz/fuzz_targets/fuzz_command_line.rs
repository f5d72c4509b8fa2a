#![no_main]

use libfuzzer_sys::fuzz_target;

use autosync::sync::build_command_line;
use autosync::SyncJobSpec;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = text.splitn(5, '\n');
    let local = fields.next().unwrap_or_default();
    let remote = fields.next().unwrap_or_default();
    let host = fields.next().unwrap_or_default();
    let user = fields.next().unwrap_or_default();
    let extra = fields.next().unwrap_or_default();

    let spec = SyncJobSpec::new(local, remote, host, 22, user).with_extra_params(extra);
    let line = build_command_line(&spec);
    assert!(line.contains(" --delete -avz "));
});
