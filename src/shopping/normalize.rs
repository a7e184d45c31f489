//! Aisle and ingredient name normalization

/// Aisle used when a line has none
pub const DEFAULT_AISLE: &str = "Other";

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite common aisle spellings to one canonical phrase
fn canonical_aisle(aisle: &str) -> Option<&'static str> {
    let canonical = match aisle {
        "dairy & eggs" | "dairy & egg" | "eggs & dairy" | "egg & dairy" | "dairy" | "eggs"
        | "dairy products" | "milk & eggs" => "dairy & eggs",
        "produce" | "fresh produce" | "fruit & vegetables" | "fruits & vegetables"
        | "vegetables & fruit" | "vegetables & fruits" | "fruit & veg" | "fruit" | "fruits"
        | "vegetables" | "veggies" => "produce",
        "meat & seafood" | "seafood & meat" | "meat & fish" | "fish & meat" | "meat"
        | "meats" | "seafood" | "fish" | "butcher" | "meat & poultry" => "meat & seafood",
        "pantry" | "pantry staples" | "dry goods" | "canned goods" | "canned & dry goods"
        | "staples" => "pantry",
        "bakery" | "bread" | "breads" | "bread & bakery" | "bakery & bread" => "bakery",
        "frozen" | "frozen foods" | "frozen food" | "freezer" => "frozen",
        "beverages" | "beverage" | "drinks" | "drink" => "beverages",
        "spices" | "spice" | "spices & seasonings" | "seasonings" | "herbs & spices"
        | "spices & herbs" => "spices",
        "baking" | "baking supplies" | "baking goods" | "baking aisle" => "baking",
        _ => return None,
    };
    Some(canonical)
}

/// Uppercase the first letter of every word
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize an aisle label for grouping and display.
///
/// "Dairy and Eggs", "eggs/dairy" and "DAIRY" all become "Dairy & Eggs".
/// An aisle without any letters or digits becomes "Other".
pub fn normalize_aisle(raw: &str) -> String {
    let lowered = format!(" {} ", raw.trim().to_lowercase());
    let joined = lowered.replace(" and ", " & ").replace('/', " & ");
    let collapsed = collapse_whitespace(&joined);

    if !collapsed.chars().any(char::is_alphanumeric) {
        return DEFAULT_AISLE.to_string();
    }

    match canonical_aisle(&collapsed) {
        Some(canonical) => title_case(canonical),
        None => title_case(&collapsed),
    }
}

/// Normalize an ingredient name into its grouping key.
///
/// Lowercases, trims, turns hyphens into spaces and collapses whitespace.
/// An empty result means the line carries no ingredient.
pub fn normalize_name(raw: &str) -> String {
    collapse_whitespace(&raw.to_lowercase().replace('-', " "))
}
