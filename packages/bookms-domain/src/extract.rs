/// Returns the first balanced `{ ... }` region of `text`.
///
/// Braces inside JSON string literals are ignored. `None` when there is no opening brace or the
/// first one is never closed.
pub fn first_json_object(text: &str) -> Option<&str> {
	let start = text.find('{')?;
	let mut depth = 0_usize;
	let mut in_string = false;
	let mut escaped = false;

	for (offset, ch) in text[start..].char_indices() {
		if in_string {
			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == '"' {
				in_string = false;
			}

			continue;
		}

		match ch {
			'"' => in_string = true,
			'{' => depth += 1,
			'}' => {
				depth -= 1;

				if depth == 0 {
					let end = start + offset + ch.len_utf8();

					return Some(&text[start..end]);
				}
			},
			_ => {},
		}
	}

	None
}
