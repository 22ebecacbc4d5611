#![no_main]

use keybridge_identity::trust;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = trust::authorized_hosts_line("fuzz", data);
});
