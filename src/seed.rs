// Random directory entries matching the original sample data set.
use crate::errors::Result;
use crate::model::{COLL_RESTAURANTS, PRICE_MAX, PRICE_MIN, Restaurant};
use crate::store::DocumentStore;
use rand::Rng;

const NAME_FIRST_WORDS: &[&str] =
    &["Foo", "Bar", "Baz", "Qux", "Fire", "Sam's", "World Famous", "Google", "The Best"];
const NAME_SECOND_WORDS: &[&str] =
    &["Restaurant", "Cafe", "Spot", "Eatin' Place", "Eatery", "Drive Thru", "Diner"];
const CITIES: &[&str] =
    &["Albany", "San Francisco", "St. Louis", "Washington D.C.", "Seattle", "Tokyo"];
const CATEGORIES: &[&str] = &[
    "Brunch",
    "Burgers",
    "Coffee",
    "Deli",
    "Dim Sum",
    "Indian",
    "Italian",
    "Mediterranean",
    "Mexican",
    "Pizza",
    "Ramen",
    "Sushi",
];
const PHOTO_COUNT: u32 = 22;

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&str]) -> String {
    words[rng.random_range(0..words.len())].to_string()
}

/// A restaurant with random attributes and zeroed aggregates. Aggregates
/// only ever change through the rating transaction engine.
pub fn random_restaurant<R: Rng + ?Sized>(rng: &mut R) -> Restaurant {
    Restaurant {
        name: format!("{} {}", pick(rng, NAME_FIRST_WORDS), pick(rng, NAME_SECOND_WORDS)),
        city: pick(rng, CITIES),
        category: pick(rng, CATEGORIES),
        price: rng.random_range(PRICE_MIN..=PRICE_MAX),
        photo: format!(
            "https://storage.googleapis.com/firestorequickstarts.appspot.com/food_{}.png",
            rng.random_range(1..=PHOTO_COUNT)
        ),
        num_ratings: 0,
        avg_rating: 0.0,
    }
}

/// Writes `count` random restaurants and returns their assigned ids.
///
/// # Errors
/// Propagates store write failures.
pub async fn add_random_restaurants<S>(store: &S, count: usize) -> Result<Vec<String>>
where
    S: DocumentStore + ?Sized,
{
    let restaurants: Vec<Restaurant> = {
        let mut rng = rand::rng();
        (0..count).map(|_| random_restaurant(&mut rng)).collect()
    };
    let mut ids = Vec::with_capacity(count);
    for restaurant in restaurants {
        let id = store.new_document_id(COLL_RESTAURANTS);
        store.put(COLL_RESTAURANTS, &id, restaurant.to_document()).await?;
        ids.push(id);
    }
    log::info!("seeded {count} random restaurants");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_restaurants_are_well_formed() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let r = random_restaurant(&mut rng);
            assert!(!r.name.is_empty());
            assert!((PRICE_MIN..=PRICE_MAX).contains(&r.price));
            assert_eq!(r.num_ratings, 0);
            assert_eq!(r.avg_rating, 0.0);
            // Round-trips through the store document shape.
            assert_eq!(Restaurant::from_document(&r.to_document()).unwrap(), r);
        }
    }
}
