// URL builders for the match backend

pub fn participants_url(base: &str, match_id: &str) -> String {
    format!("{}/match/{}/participants/", base, match_id)
}

pub fn timeline_url(base: &str, match_id: &str) -> String {
    format!("{}/match/{}/timeline/", base, match_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(
            timeline_url("http://localhost:8000/api", "NA1_123"),
            "http://localhost:8000/api/match/NA1_123/timeline/"
        );
        assert_eq!(
            participants_url("https://example.org/api", "EUW1_9"),
            "https://example.org/api/match/EUW1_9/participants/"
        );
    }
}
