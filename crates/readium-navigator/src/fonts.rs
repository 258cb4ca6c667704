//! Font family declarations and font-stack resolution.

use std::collections::{BTreeMap, BTreeSet};

use readium_preferences::epub::FontFamily;
use smallvec::SmallVec;

/// Ordered fallback chain of font families, most preferred first.
pub type FontStack = SmallVec<[FontFamily; 4]>;

/// A font family known to the navigator, with the families to fall back to
/// when it cannot be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFamilyDeclaration {
    pub family: FontFamily,
    /// Fallbacks, most preferred first.
    pub alternates: Vec<FontFamily>,
}

impl FontFamilyDeclaration {
    pub fn new(family: FontFamily) -> Self {
        Self {
            family,
            alternates: Vec::new(),
        }
    }

    pub fn with_alternate(mut self, alternate: FontFamily) -> Self {
        self.alternates.push(alternate);
        self
    }
}

/// Registry of font family declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontDeclarations {
    declarations: BTreeMap<FontFamily, FontFamilyDeclaration>,
}

impl FontDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accessibility fonts bundled with ReadiumCSS, falling back to generic
    /// families.
    pub fn readium_defaults() -> Self {
        let mut fonts = Self::new();
        fonts.declare(
            FontFamilyDeclaration::new(FontFamily::open_dyslexic())
                .with_alternate(FontFamily::sans_serif()),
        );
        fonts.declare(
            FontFamilyDeclaration::new(FontFamily::accessible_dfa())
                .with_alternate(FontFamily::new("Verdana"))
                .with_alternate(FontFamily::sans_serif()),
        );
        fonts.declare(
            FontFamilyDeclaration::new(FontFamily::ia_writer_duospace())
                .with_alternate(FontFamily::monospace()),
        );
        fonts
    }

    /// Add or replace the declaration of `declaration.family`.
    pub fn declare(&mut self, declaration: FontFamilyDeclaration) {
        self.declarations
            .insert(declaration.family.clone(), declaration);
    }

    pub fn get(&self, family: &FontFamily) -> Option<&FontFamilyDeclaration> {
        self.declarations.get(family)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Expand `family` into its fallback chain.
    ///
    /// The requested family comes first, followed depth-first by each
    /// alternate and its own alternates. A family is listed once, at its
    /// first occurrence; alternates looping back to a family being expanded
    /// are dropped with a warning.
    pub fn resolve_font_stack(&self, family: &FontFamily) -> FontStack {
        let mut stack = FontStack::new();
        let mut seen = BTreeSet::new();
        let mut path = Vec::new();
        self.expand(family, &mut stack, &mut seen, &mut path);
        stack
    }

    fn expand<'a>(
        &'a self,
        family: &'a FontFamily,
        stack: &mut FontStack,
        seen: &mut BTreeSet<&'a FontFamily>,
        path: &mut Vec<&'a FontFamily>,
    ) {
        if path.contains(&family) {
            log::warn!(
                "font family {} lists itself as an alternate via {:?}",
                family,
                path.iter().map(|f| f.name()).collect::<Vec<_>>()
            );
            return;
        }
        if !seen.insert(family) {
            return;
        }
        stack.push(family.clone());

        let Some(declaration) = self.get(family) else {
            return;
        };
        path.push(family);
        for alternate in &declaration.alternates {
            self.expand(alternate, stack, seen, path);
        }
        path.pop();
    }
}

/// Family names of `stack`, as written in CSS.
pub fn font_stack_names(stack: &FontStack) -> Vec<String> {
    stack.iter().map(|family| family.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(name: &str) -> FontFamily {
        FontFamily::new(name)
    }

    fn names(stack: &FontStack) -> Vec<&str> {
        stack.iter().map(FontFamily::name).collect()
    }

    #[test]
    fn undeclared_family_resolves_to_itself() {
        let fonts = FontDeclarations::new();
        assert_eq!(names(&fonts.resolve_font_stack(&family("Georgia"))), ["Georgia"]);
    }

    #[test]
    fn alternates_expand_depth_first() {
        let mut fonts = FontDeclarations::new();
        fonts.declare(
            FontFamilyDeclaration::new(family("A"))
                .with_alternate(family("B"))
                .with_alternate(family("C")),
        );
        fonts.declare(FontFamilyDeclaration::new(family("B")).with_alternate(family("B1")));
        fonts.declare(FontFamilyDeclaration::new(family("C")).with_alternate(family("C1")));
        assert_eq!(
            names(&fonts.resolve_font_stack(&family("A"))),
            ["A", "B", "B1", "C", "C1"]
        );
    }

    #[test]
    fn shared_alternates_are_listed_once() {
        let mut fonts = FontDeclarations::new();
        fonts.declare(
            FontFamilyDeclaration::new(family("A"))
                .with_alternate(family("B"))
                .with_alternate(family("serif")),
        );
        fonts.declare(FontFamilyDeclaration::new(family("B")).with_alternate(family("serif")));
        assert_eq!(
            names(&fonts.resolve_font_stack(&family("A"))),
            ["A", "B", "serif"]
        );
    }

    #[test]
    fn cycles_terminate() {
        let mut fonts = FontDeclarations::new();
        fonts.declare(FontFamilyDeclaration::new(family("A")).with_alternate(family("B")));
        fonts.declare(
            FontFamilyDeclaration::new(family("B"))
                .with_alternate(family("A"))
                .with_alternate(family("C")),
        );
        fonts.declare(FontFamilyDeclaration::new(family("Self")).with_alternate(family("Self")));
        assert_eq!(names(&fonts.resolve_font_stack(&family("A"))), ["A", "B", "C"]);
        assert_eq!(names(&fonts.resolve_font_stack(&family("Self"))), ["Self"]);
    }

    #[test]
    fn readium_defaults_fall_back_to_generic_families() {
        let fonts = FontDeclarations::readium_defaults();
        assert_eq!(fonts.len(), 3);
        let stack = fonts.resolve_font_stack(&FontFamily::accessible_dfa());
        assert_eq!(
            font_stack_names(&stack),
            ["AccessibleDfA", "Verdana", "sans-serif"]
        );
    }
}
