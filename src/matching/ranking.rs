//! Candidate ranking for class diffs that compete to explain one added class.
//!
//! Candidates are ordered most-preferred first by:
//!
//! | Step | Rule |
//! |------|------|
//! | 1 | Smaller normalized distance between target and source folders |
//! | 2 | Target nested inside the source class |
//! | 3 | Target's superclass is the source class |
//! | 4 | Order of the enclosing class diffs |
//!
//! Each step is a total preorder, so the chain is a strict weak order and
//! safe for both sorting and picking a minimum.

use std::cmp::Ordering;

use crate::core::model::ClassModel;
use crate::core::node::simple_name;
use crate::matching::class_diff::ClassDiff;
use crate::refactoring::Refactoring;
use crate::utils::similarity::normalized_distance;

/// A tentative refactoring from one class diff into a target class that other
/// class diffs may also claim
#[derive(Debug, Clone)]
pub struct Candidate<'d, 'a> {
    class_diff: &'d ClassDiff<'a>,
    target: &'a ClassModel,
    refactoring: Refactoring<'a>,
    distance: f64,
}

impl<'d, 'a> Candidate<'d, 'a> {
    /// `target` is the class the refactoring would move code into,
    /// `class_diff` the diff of the source class
    #[must_use]
    pub fn new(
        class_diff: &'d ClassDiff<'a>,
        target: &'a ClassModel,
        refactoring: Refactoring<'a>,
    ) -> Self {
        let distance = normalized_distance(
            target.source_folder(),
            class_diff.next().source_folder(),
        );
        Self {
            class_diff,
            target,
            refactoring,
            distance,
        }
    }

    #[must_use]
    pub fn class_diff(&self) -> &'d ClassDiff<'a> {
        self.class_diff
    }

    #[must_use]
    pub fn target(&self) -> &'a ClassModel {
        self.target
    }

    #[must_use]
    pub fn refactoring(&self) -> &Refactoring<'a> {
        &self.refactoring
    }

    #[must_use]
    pub fn into_refactoring(self) -> Refactoring<'a> {
        self.refactoring
    }

    /// Normalized edit distance between the target and source folders
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Target is declared inside the source class
    #[must_use]
    pub fn is_inner_class(&self) -> bool {
        self.target.is_inner_class_of(self.class_diff.next())
    }

    /// Target extends the source class
    #[must_use]
    pub fn is_subclass(&self) -> bool {
        let source = simple_name(&self.class_diff.next().name);
        self.target
            .superclass
            .as_ref()
            .is_some_and(|s| simple_name(&s.name) == source)
    }

    /// Preference order, `Less` meaning `self` is preferred
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| prefer(self.is_inner_class(), other.is_inner_class()))
            .then_with(|| prefer(self.is_subclass(), other.is_subclass()))
            .then_with(|| self.class_diff.compare(other.class_diff))
    }
}

/// `true` sorts first
fn prefer(a: bool, b: bool) -> Ordering {
    b.cmp(&a)
}

/// Sort candidates most-preferred first
#[must_use]
pub fn rank<'d, 'a>(mut candidates: Vec<Candidate<'d, 'a>>) -> Vec<Candidate<'d, 'a>> {
    candidates.sort_by(Candidate::compare);
    candidates
}

/// Pick the accepted refactorings among competing candidates.
///
/// When the best candidate extracts into an inner class or a subclass of the
/// source, it alone is accepted. Otherwise every candidate is accepted, best
/// first.
#[must_use]
pub fn select<'a>(candidates: Vec<Candidate<'_, 'a>>) -> Vec<Refactoring<'a>> {
    let mut ranked = rank(candidates);
    let Some(best) = ranked.first() else {
        return Vec::new();
    };

    tracing::debug!(
        source = %best.class_diff.next().name,
        target = %best.target.name,
        distance = best.distance,
        competing = ranked.len(),
        "Best candidate"
    );

    if best.is_inner_class() || best.is_subclass() {
        ranked.truncate(1);
    }
    ranked.into_iter().map(Candidate::into_refactoring).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::LocationInfo;
    use crate::core::model::TypeRef;
    use crate::refactoring::ExtractedClass;

    fn class(name: &str, file: &str) -> ClassModel {
        let mut class = ClassModel::new(name, "org.acme");
        class.location = LocationInfo::new(file, 1, 10);
        class
    }

    fn extract<'a>(diff: &ClassDiff<'a>, target: &'a ClassModel) -> Refactoring<'a> {
        Refactoring::ExtractClass(ExtractedClass {
            extracted: target,
            source_before: diff.original(),
            source_after: diff.next(),
            moved_operations: Vec::new(),
            moved_attributes: Vec::new(),
            attribute_of_extracted_type: None,
        })
    }

    #[test]
    fn test_closer_folder_wins() {
        let source = class("org.acme.Shop", "core/src/main/java/org/acme/Shop.java");
        let near = class("org.acme.Cart", "core/src/main/java/org/acme/Cart.java");
        let far = class("org.acme.Cart", "web/src/test/java/org/acme/Cart.java");
        let diff = ClassDiff::compute(&source, &source);

        let a = Candidate::new(&diff, &near, extract(&diff, &near));
        let b = Candidate::new(&diff, &far, extract(&diff, &far));
        assert!(a.distance() < b.distance());
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_inner_class_wins_tie() {
        let source = class("org.acme.Shop", "src/org/acme/Shop.java");
        let inner = class("org.acme.Shop.Cart", "src/org/acme/Shop.java");
        let outer = class("org.acme.Cart", "src/org/acme/Cart.java");
        let diff = ClassDiff::compute(&source, &source);

        let a = Candidate::new(&diff, &inner, extract(&diff, &inner));
        let b = Candidate::new(&diff, &outer, extract(&diff, &outer));
        assert!((a.distance() - b.distance()).abs() < 0.001);
        assert!(a.is_inner_class());
        assert!(!b.is_inner_class());
        assert_eq!(a.compare(&b), Ordering::Less);

        let accepted = select(vec![b, a]);
        assert_eq!(accepted.len(), 1);
        assert!(accepted[0].to_string().contains("org.acme.Shop.Cart"));
    }

    #[test]
    fn test_subclass_wins_tie() {
        let source = class("org.acme.Shop", "src/org/acme/Shop.java");
        let mut sub = class("org.acme.OnlineShop", "src/org/acme/OnlineShop.java");
        sub.superclass = Some(TypeRef::new("Shop"));
        let other = class("org.acme.Cart", "src/org/acme/Cart.java");
        let diff = ClassDiff::compute(&source, &source);

        let a = Candidate::new(&diff, &sub, extract(&diff, &sub));
        let b = Candidate::new(&diff, &other, extract(&diff, &other));
        assert!(a.is_subclass());
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_plain_candidates_all_accepted() {
        let source = class("org.acme.Shop", "src/org/acme/Shop.java");
        let cart = class("org.acme.Cart", "src/org/acme/Cart.java");
        let basket = class("org.acme.Basket", "src/org/acme/Basket.java");
        let diff = ClassDiff::compute(&source, &source);

        let accepted = select(vec![
            Candidate::new(&diff, &cart, extract(&diff, &cart)),
            Candidate::new(&diff, &basket, extract(&diff, &basket)),
        ]);
        assert_eq!(accepted.len(), 2);
        assert!(select(Vec::new()).is_empty());
    }

    #[test]
    fn test_order_is_consistent() {
        let first = class("org.acme.Alpha", "a/src/org/acme/Alpha.java");
        let second = class("org.acme.Beta", "b/src/org/acme/Beta.java");
        let targets = [
            class("org.acme.Alpha.Inner", "a/src/org/acme/Alpha.java"),
            class("org.acme.Cart", "a/src/org/acme/Cart.java"),
            class("org.acme.Cart", "b/src/org/acme/Cart.java"),
            class("org.acme.Cart", "c/test/org/acme/Cart.java"),
        ];
        let diff_a = ClassDiff::compute(&first, &first);
        let diff_b = ClassDiff::compute(&second, &second);

        let mut candidates = Vec::new();
        for target in &targets {
            candidates.push(Candidate::new(&diff_a, target, extract(&diff_a, target)));
            candidates.push(Candidate::new(&diff_b, target, extract(&diff_b, target)));
        }

        for a in &candidates {
            assert_eq!(a.compare(a), Ordering::Equal);
            for b in &candidates {
                assert_eq!(a.compare(b), b.compare(a).reverse());
                for c in &candidates {
                    if a.compare(b) == Ordering::Less && b.compare(c) == Ordering::Less {
                        assert_eq!(a.compare(c), Ordering::Less);
                    }
                }
            }
        }

        let ranked = rank(candidates);
        for pair in ranked.windows(2) {
            assert_ne!(pair[0].compare(&pair[1]), Ordering::Greater);
        }
    }
}
