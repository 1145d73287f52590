/*
 * Responsibility
 * - 上流 API の URL 組み立て (base + path, collection + item)
 * - 明示指定された login URL の正規化
 * - 純粋関数のみ (I/O しない)
 */
use url::{Url, form_urlencoded};

/// `base` の末尾 `/` を全て落とし、`path` の先頭に `/` を 1 つだけ保証して連結する。
pub fn build_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// collection URL に path segment を 1 つ足す (`encodeURIComponent` 相当でエンコード)
pub fn item_url(collection: &str, segment: &str) -> String {
    build_url(collection, &encode_segment(segment))
}

/// path segment 用の percent-encoding (`encodeURIComponent` と同じ文字集合)。
/// form_urlencoded は空白を `+` にし、`~ ! ' ( )` もエンコードするので戻す
/// (リテラルの `+` は `%2B` になっている)
pub fn encode_segment(segment: &str) -> String {
    const KEEP: [(&str, &str); 6] = [
        ("+", "%20"),
        ("%7E", "~"),
        ("%21", "!"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
    ];

    let mut encoded: String = form_urlencoded::byte_serialize(segment.as_bytes()).collect();
    for (from, to) in KEEP {
        encoded = encoded.replace(from, to);
    }
    encoded
}

/// path 中の連続した `/` を 1 つに畳む。URL として解釈できなければそのまま返す。
pub fn normalize_login_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };
    if parsed.cannot_be_a_base() {
        return raw.to_string();
    }

    let mut path = String::with_capacity(parsed.path().len());
    for ch in parsed.path().chars() {
        if ch == '/' && path.ends_with('/') {
            continue;
        }
        path.push(ch);
    }
    parsed.set_path(&path);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_exactly_one_slash() {
        assert_eq!(build_url("http://x/", "/y"), "http://x/y");
        assert_eq!(build_url("http://x", "y"), "http://x/y");
        assert_eq!(build_url("http://x/", "y"), "http://x/y");
        assert_eq!(build_url("http://x///", "/y"), "http://x/y");
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = build_url("http://x//", "users");
        let twice = build_url(&build_url("http://x//", ""), "users");

        assert_eq!(once, "http://x/users");
        assert_eq!(twice, once);
    }

    #[test]
    fn item_url_encodes_the_segment() {
        assert_eq!(item_url("http://x/users/", "42"), "http://x/users/42");
        assert_eq!(
            item_url("http://x/prompt-configs", "greeting v2/a+b"),
            "http://x/prompt-configs/greeting%20v2%2Fa%2Bb"
        );
    }

    #[test]
    fn encode_segment_keeps_unreserved_characters() {
        assert_eq!(encode_segment("chat.system-prompt_1"), "chat.system-prompt_1");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn encode_segment_matches_encode_uri_component() {
        assert_eq!(encode_segment("a~b!(c)'*"), "a~b!(c)'*");
        assert_eq!(encode_segment("a+b c/d?e#f&g=h%"), "a%2Bb%20c%2Fd%3Fe%23f%26g%3Dh%25");
    }

    #[test]
    fn login_url_collapses_repeated_slashes() {
        assert_eq!(
            normalize_login_url("http://127.0.0.1:8000//auth///login"),
            "http://127.0.0.1:8000/auth/login"
        );
        assert_eq!(
            normalize_login_url("https://api.example.com/auth/login?next=//x"),
            "https://api.example.com/auth/login?next=//x"
        );
    }

    #[test]
    fn unparsable_login_url_is_used_verbatim() {
        assert_eq!(normalize_login_url("/auth//login"), "/auth//login");
    }
}
