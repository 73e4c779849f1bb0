#![no_main]

use libfuzzer_sys::fuzz_target;
use norepeat::{GenerateError, Params, RejectionSampler, SequenceGenerator};

fuzz_target!(|data: &[u8]| {
    // Arbitrary small parameters - should never panic, only return errors
    if data.len() < 11 {
        return;
    }
    let range = u32::from(data[0]);
    let window = usize::from(data[1]);
    let length = usize::from(u16::from_le_bytes([data[2], 0x01 & data[3]]));
    let seed = u64::from_le_bytes([
        data[3], data[4], data[5], data[6], data[7], data[8], data[9], data[10],
    ]);

    let params = Params::new(range, window, length);
    match RejectionSampler::from_seed(seed).generate(&params) {
        Ok(seq) => {
            assert_eq!(seq.len(), length);
            assert!(seq.iter().all(|&v| v >= 1 && v <= range));
            assert!(seq.is_window_distinct(window));
        }
        Err(GenerateError::GenerationExhausted { position, .. }) => {
            assert!(params.validate().is_ok());
            assert!(position < length);
        }
        Err(err) => assert_eq!(params.validate(), Err(err)),
    }
});
