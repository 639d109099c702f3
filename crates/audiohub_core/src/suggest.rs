/// Keys that move through the rendered suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKey {
    Up,
    Down,
    Escape,
}

/// Input that already names a media item; suggestions make no sense for it.
pub fn looks_like_media_url(query: &str) -> bool {
    query.contains("youtube.com") || query.contains("youtu.be")
}

/// Debounce bookkeeping for search suggestions.
///
/// Every input change bumps `generation`. A timer or a response tagged with an
/// older generation has been superseded and is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionState {
    generation: u64,
    pending: Option<String>,
    shown: Vec<String>,
    selected: Option<usize>,
}

impl SuggestionState {
    /// Returns the generation to schedule a timer for, or `None` when the
    /// input is suppressed.
    pub fn input_changed(&mut self, raw: &str, min_chars: usize) -> Option<u64> {
        self.generation += 1;
        self.pending = None;
        let query = raw.trim();
        if looks_like_media_url(query) || query.chars().count() < min_chars {
            self.hide();
            return None;
        }
        self.pending = Some(query.to_string());
        Some(self.generation)
    }

    /// The debounce window closed. Yields the query to fetch if still current.
    pub fn timer_elapsed(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Applies a response. Returns `false` when it was superseded.
    pub fn loaded(&mut self, generation: u64, suggestions: Vec<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.selected = None;
        self.shown = suggestions;
        true
    }

    /// Invalidates pending timers and in-flight calls and hides the list.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.hide();
    }

    pub fn hide(&mut self) {
        self.shown.clear();
        self.selected = None;
    }

    /// Moves the highlight. Returns the newly highlighted suggestion, if any.
    pub fn navigate(&mut self, key: SuggestionKey) -> Option<&str> {
        if self.shown.is_empty() {
            return None;
        }
        match key {
            SuggestionKey::Down => {
                let last = self.shown.len() - 1;
                self.selected = Some(self.selected.map_or(0, |index| (index + 1).min(last)));
            }
            SuggestionKey::Up => {
                self.selected = match self.selected {
                    Some(0) | None => None,
                    Some(index) => Some(index - 1),
                };
            }
            SuggestionKey::Escape => {
                self.hide();
                return None;
            }
        }
        self.selected.map(|index| self.shown[index].as_str())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(items: &[&str]) -> SuggestionState {
        let mut state = SuggestionState::default();
        let generation = state.input_changed("qu", 2).unwrap();
        state.timer_elapsed(generation);
        state.loaded(generation, items.iter().map(|s| s.to_string()).collect());
        state
    }

    #[test]
    fn short_and_url_input_is_suppressed() {
        let mut state = SuggestionState::default();
        assert_eq!(state.input_changed("a", 2), None);
        assert_eq!(state.input_changed("  b ", 2), None);
        assert_eq!(state.input_changed("https://www.youtube.com/watch?v=x", 2), None);
        assert_eq!(state.input_changed("youtu.be/abc", 2), None);
        assert!(state.input_changed("ab", 2).is_some());
    }

    #[test]
    fn superseded_timer_and_response_are_dropped() {
        let mut state = SuggestionState::default();
        let first = state.input_changed("lo", 2).unwrap();
        let second = state.input_changed("lofi", 2).unwrap();

        assert_eq!(state.timer_elapsed(first), None);
        assert_eq!(state.timer_elapsed(second).as_deref(), Some("lofi"));
        assert!(!state.loaded(first, vec!["stale".to_string()]));
        assert!(state.shown().is_empty());
    }

    #[test]
    fn response_after_newer_keystroke_is_dropped() {
        let mut state = SuggestionState::default();
        let generation = state.input_changed("lofi", 2).unwrap();
        state.timer_elapsed(generation);
        state.input_changed("lofi h", 2);
        assert!(!state.loaded(generation, vec!["lofi hip hop".to_string()]));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut state = shown(&["one", "two"]);
        assert_eq!(state.navigate(SuggestionKey::Down), Some("one"));
        assert_eq!(state.navigate(SuggestionKey::Down), Some("two"));
        assert_eq!(state.navigate(SuggestionKey::Down), Some("two"));
        assert_eq!(state.navigate(SuggestionKey::Up), Some("one"));
        assert_eq!(state.navigate(SuggestionKey::Up), None);
        assert_eq!(state.selected(), None);
        assert_eq!(state.navigate(SuggestionKey::Up), None);
    }

    #[test]
    fn escape_hides_list() {
        let mut state = shown(&["one"]);
        state.navigate(SuggestionKey::Down);
        assert_eq!(state.navigate(SuggestionKey::Escape), None);
        assert!(state.shown().is_empty());
        assert_eq!(state.navigate(SuggestionKey::Down), None);
    }
}
