/// The embedded standard library.
///
/// The `.rnl` sources ship inside the binary, keyed by their lowercase
/// snake_case path; the module loader consults this table before touching
/// the filesystem, so `Array`, `String`, `Math`, `File` and `Map` resolve
/// anywhere.
pub const FILES: &[(&str, &str)] = &[("array.rnl", include_str!("../../stdlib/array.rnl")),
                                     ("file.rnl", include_str!("../../stdlib/file.rnl")),
                                     ("map.rnl", include_str!("../../stdlib/map.rnl")),
                                     ("math.rnl", include_str!("../../stdlib/math.rnl")),
                                     ("string.rnl", include_str!("../../stdlib/string.rnl"))];

/// The embedded source behind `path`, if the standard library ships it.
#[must_use]
pub fn lookup(path: &str) -> Option<&'static str> {
    FILES.iter().find(|(name, _)| *name == path).map(|(_, source)| *source)
}
