use super::vector::{Character, OptionNA, Rep};
use super::Obj;

/// Lists share the vector representation, holding arbitrary objects.
pub type List = Rep<Obj>;

impl Rep<Obj> {
    /// Build a list from optionally named elements
    ///
    /// The list is only named when at least one element carries a name;
    /// unnamed elements then receive empty names.
    pub fn from_pairs(pairs: Vec<(Option<&str>, Obj)>) -> List {
        let named = pairs.iter().any(|(n, _)| n.is_some());
        let (names, values): (Vec<Character>, Vec<Obj>) = pairs
            .into_iter()
            .map(|(n, v)| (OptionNA::Some(n.unwrap_or("").to_string()), v))
            .unzip();

        let mut list = List::from(values);
        if named {
            list.set_names(Some(names));
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_with_names() {
        let l = List::from_pairs(vec![(Some("a"), Obj::from(1)), (None, Obj::Null)]);
        assert_eq!(l.len(), 2);
        assert_eq!(
            l.names(),
            Some(
                &[
                    OptionNA::Some("a".to_string()),
                    OptionNA::Some(String::new())
                ][..]
            )
        );
    }

    #[test]
    fn pairs_without_names() {
        let l = List::from_pairs(vec![(None, Obj::from(1)), (None, Obj::from("b"))]);
        assert_eq!(l.names(), None);
        assert_eq!(l.get(1), Some(&Obj::from("b")));
    }
}
