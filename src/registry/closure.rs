//! Ontological closure rules (C3 §4.3), run after streaming completes.
//! Subclass transitivity is maintained incrementally by
//! `types::TypeRegistry::add_subclass` as edges arrive; this module runs
//! the two closure passes that are cheaper to apply once at the end:
//! sub-property propagation and inverse-property domain/range swapping.
//! Grounded on `KnowledgeSource._post_process_subproperties` /
//! `_post_process_inverse_of`.

use super::property::PropertyRegistry;
use super::types::TypeRegistry;

/// If `p' subPropertyOf p`, copies `p`'s kind flag onto `p'` (asserting
/// consistency) and unions `p`'s domains/ranges into `p'`'s.
pub fn propagate_subproperties(properties: &mut PropertyRegistry) {
    let pairs: Vec<(String, String)> = properties
        .subproperties
        .iter()
        .flat_map(|(sup, subs)| subs.iter().map(move |sub| (sup.clone(), sub.clone())))
        .collect();

    for (superproperty_iri, subproperty_iri) in pairs {
        let (super_is_object, super_is_datatype, super_domains, super_ranges) = {
            let sup = properties.get_or_add(&superproperty_iri);
            (sup.is_object, sup.is_datatype, sup.domains.clone(), sup.ranges.clone())
        };

        let sub = properties.get_or_add(&subproperty_iri);
        if super_is_object {
            debug_assert!(!sub.is_datatype, "sub-property of an object property cannot be datatype");
            sub.is_object = true;
        } else if super_is_datatype {
            debug_assert!(!sub.is_object, "sub-property of a datatype property cannot be object");
            sub.is_datatype = true;
        }
        sub.domains.extend(super_domains);
        sub.ranges.extend(super_ranges);
        tracing::debug!(super_property = %superproperty_iri, sub_property = %subproperty_iri, "propagated sub-property kind and domain/range");
    }
}

/// If `p1 owl:inverseOf p2`: both become object properties, and domains
/// and ranges swap and union in both directions.
pub fn propagate_inverse_properties(properties: &mut PropertyRegistry) {
    let pairs: Vec<(String, String)> = properties.inverse_properties.iter().cloned().collect();

    for (p1_iri, p2_iri) in pairs {
        let (p1_domains, p1_ranges) = {
            let p1 = properties.get_or_add(&p1_iri);
            p1.is_object = true;
            (p1.domains.clone(), p1.ranges.clone())
        };
        let (p2_domains, p2_ranges) = {
            let p2 = properties.get_or_add(&p2_iri);
            p2.is_object = true;
            (p2.domains.clone(), p2.ranges.clone())
        };

        {
            let p2 = properties.get_or_add(&p2_iri);
            p2.ranges.extend(p1_domains.clone());
            p2.domains.extend(p1_ranges.clone());
        }
        {
            let p1 = properties.get_or_add(&p1_iri);
            p1.ranges.extend(p2_domains);
            p1.domains.extend(p2_ranges);
        }
        tracing::debug!(p1 = %p1_iri, p2 = %p2_iri, "swapped inverse-property domain/range");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subproperty_inherits_object_kind() {
        let mut types = TypeRegistry::new();
        let mut props = PropertyRegistry::new();
        props.assert_object_property("http://ex.org#p");
        props.add_domain("http://ex.org#p", "D", &mut types);
        props.add_subproperty("http://ex.org#p", "http://ex.org#p2");
        propagate_subproperties(&mut props);
        let sub = props.get("http://ex.org#p2").unwrap();
        assert!(sub.is_object);
        assert!(sub.domains.contains("D"));
    }

    #[test]
    fn inverse_of_swaps_domain_and_range() {
        let mut types = TypeRegistry::new();
        let mut props = PropertyRegistry::new();
        props.add_domain("http://ex.org#p1", "D", &mut types);
        props.add_inverse("http://ex.org#p1", "http://ex.org#p2");
        propagate_inverse_properties(&mut props);
        assert!(props.get("http://ex.org#p2").unwrap().ranges.contains("D"));
    }
}
