use crate::models::Season;

/// `n` consecutive seasons starting at `start`, cycling Kharif → Rabi → Zaid.
pub fn season_sequence(start: Season, n: usize) -> Vec<Season> {
    std::iter::successors(Some(start), |s| Some(s.next()))
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_requested_season() {
        assert_eq!(
            season_sequence(Season::Rabi, 4),
            vec![Season::Rabi, Season::Zaid, Season::Kharif, Season::Rabi]
        );
    }

    #[test]
    fn wraps_every_three() {
        let seq = season_sequence(Season::Kharif, 7);
        assert_eq!(seq.len(), 7);
        assert_eq!(seq[0], seq[3]);
        assert_eq!(seq[3], seq[6]);
    }

    #[test]
    fn zero_length() {
        assert!(season_sequence(Season::Zaid, 0).is_empty());
    }
}
