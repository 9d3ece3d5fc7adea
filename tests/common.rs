use std::fs;
use std::path::Path;

// Deterministic, non-repeating content so a misordered or missing part is
// visible in a byte comparison.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[allow(dead_code)]
pub fn write_sample(path: &Path, len: usize) -> Vec<u8> {
    let bytes = sample_bytes(len);
    fs::write(path, &bytes).unwrap();
    bytes
}

#[allow(dead_code)]
pub fn part_names(part_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(part_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}
