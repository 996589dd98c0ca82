use super::types::{Predicate, QueryDescription, SortDirection};
use bson::{Bson, Document as BsonDocument};
use std::cmp::Ordering;

/// Runs a query description against a snapshot of `(id, document)` pairs:
/// filter, then order, then the bound last.
#[must_use]
pub fn execute(
    query: &QueryDescription,
    mut docs: Vec<(String, BsonDocument)>,
) -> Vec<(String, BsonDocument)> {
    docs.retain(|(_, doc)| matches(doc, &query.predicates));
    docs.sort_by(|(_, a), (_, b)| compare_documents(a, b, query));
    docs.truncate(query.limit);
    docs
}

#[must_use]
pub fn matches(doc: &BsonDocument, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| match p {
        Predicate::Eq { field, value } => {
            doc.get(field).is_some_and(|v| bson_equal(v, value))
        }
    })
}

/// Ordering under the query's sort clause. Documents missing the sort
/// field collate before documents that have it.
#[must_use]
pub fn compare_documents(a: &BsonDocument, b: &BsonDocument, query: &QueryDescription) -> Ordering {
    let field = &query.order_by.field;
    let ord = match (a.get(field), b.get(field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(av), Some(bv)) => bson_cmp(av, bv).unwrap_or(Ordering::Equal),
    };
    match query.order_by.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(b: &Bson) -> Option<f64> {
    match b {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

#[allow(clippy::float_cmp)]
fn bson_equal(a: &Bson, b: &Bson) -> bool {
    if let (Some(af), Some(bf)) = (to_f64(a), to_f64(b)) {
        return af == bf;
    }
    a == b
}

fn bson_cmp(a: &Bson, b: &Bson) -> Option<Ordering> {
    if let (Some(af), Some(bf)) = (to_f64(a), to_f64(b)) {
        return af.partial_cmp(&bf);
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{OrderBy, SortDirection};
    use bson::doc;

    fn by(field: &str, direction: SortDirection) -> QueryDescription {
        QueryDescription {
            collection: "t".into(),
            predicates: Vec::new(),
            order_by: OrderBy { field: field.into(), direction },
            limit: 50,
        }
    }

    #[test]
    fn equality_coerces_numeric_types() {
        let doc = doc! { "price": 2_i32 };
        let pred = [Predicate::Eq { field: "price".into(), value: Bson::Int64(2) }];
        assert!(matches(&doc, &pred));
    }

    #[test]
    fn descending_sort_and_limit() {
        let mut q = by("avgRating", SortDirection::Descending);
        q.limit = 2;
        let docs = vec![
            ("a".to_string(), doc! { "avgRating": 2.0 }),
            ("b".to_string(), doc! { "avgRating": 4.5 }),
            ("c".to_string(), doc! { "avgRating": 3.0 }),
        ];
        let out = execute(&q, docs);
        let ids: Vec<&str> = out.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn missing_sort_field_collates_first_ascending() {
        let q = by("name", SortDirection::Ascending);
        let docs = vec![
            ("a".to_string(), doc! { "name": "Qux Cafe" }),
            ("b".to_string(), doc! {}),
        ];
        let out = execute(&q, docs);
        assert_eq!(out[0].0, "b");
    }
}
