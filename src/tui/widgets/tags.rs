/// Tags as `[tag1] [tag2]`
pub fn format_tags_brackets(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("[{}]", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_each_tag() {
        let tags = vec!["React".to_string(), "Frontend".to_string()];
        assert_eq!(format_tags_brackets(&tags), "[React] [Frontend]");
        assert_eq!(format_tags_brackets(&[]), "");
    }
}
