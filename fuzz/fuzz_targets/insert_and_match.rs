#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, i32)>, String)| {
    let mut trie = segroute::PathTrie::new();

    for (pattern, item) in data.0 {
        let _ = trie.insert(pattern, item);
    }

    if let Ok(matched) = trie.find(&data.1) {
        for (name, value) in matched.params.iter() {
            assert!(!name.is_empty());
            assert!(!value.is_empty());
        }
    }

    let _ = segroute::format_route(&data.1, &[&0]);
});
