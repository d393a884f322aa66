//! Curated metro areas used when no live geography data is available

/// A metro area from the curated fallback table
#[derive(Debug)]
pub struct CuratedMetro {
    pub id: u32,
    pub name: &'static str,
    /// Abbreviations of the states the metro spans
    pub states: &'static [&'static str],
}

const fn metro(id: u32, name: &'static str, states: &'static [&'static str]) -> CuratedMetro {
    CuratedMetro { id, name, states }
}

/// The ~50 most populous metros, largest first
pub static CURATED_METROS: [CuratedMetro; 50] = [
    metro(35620, "New York-Newark-Jersey City, NY-NJ-PA", &["NY", "NJ", "PA"]),
    metro(31080, "Los Angeles-Long Beach-Anaheim, CA", &["CA"]),
    metro(16980, "Chicago-Naperville-Elgin, IL-IN-WI", &["IL", "IN", "WI"]),
    metro(19100, "Dallas-Fort Worth-Arlington, TX", &["TX"]),
    metro(26420, "Houston-The Woodlands-Sugar Land, TX", &["TX"]),
    metro(47900, "Washington-Arlington-Alexandria, DC-VA-MD-WV", &["DC", "VA", "MD", "WV"]),
    metro(37980, "Philadelphia-Camden-Wilmington, PA-NJ-DE-MD", &["PA", "NJ", "DE", "MD"]),
    metro(33100, "Miami-Fort Lauderdale-West Palm Beach, FL", &["FL"]),
    metro(12060, "Atlanta-Sandy Springs-Alpharetta, GA", &["GA"]),
    metro(14460, "Boston-Cambridge-Newton, MA-NH", &["MA", "NH"]),
    metro(38060, "Phoenix-Mesa-Chandler, AZ", &["AZ"]),
    metro(41860, "San Francisco-Oakland-Berkeley, CA", &["CA"]),
    metro(40140, "Riverside-San Bernardino-Ontario, CA", &["CA"]),
    metro(19820, "Detroit-Warren-Dearborn, MI", &["MI"]),
    metro(42660, "Seattle-Tacoma-Bellevue, WA", &["WA"]),
    metro(33460, "Minneapolis-St. Paul-Bloomington, MN-WI", &["MN", "WI"]),
    metro(41740, "San Diego-Chula Vista-Carlsbad, CA", &["CA"]),
    metro(45300, "Tampa-St. Petersburg-Clearwater, FL", &["FL"]),
    metro(19740, "Denver-Aurora-Lakewood, CO", &["CO"]),
    metro(12580, "Baltimore-Columbia-Towson, MD", &["MD"]),
    metro(41180, "St. Louis, MO-IL", &["MO", "IL"]),
    metro(36740, "Orlando-Kissimmee-Sanford, FL", &["FL"]),
    metro(16740, "Charlotte-Concord-Gastonia, NC-SC", &["NC", "SC"]),
    metro(41700, "San Antonio-New Braunfels, TX", &["TX"]),
    metro(38900, "Portland-Vancouver-Hillsboro, OR-WA", &["OR", "WA"]),
    metro(40900, "Sacramento-Roseville-Folsom, CA", &["CA"]),
    metro(38300, "Pittsburgh, PA", &["PA"]),
    metro(29820, "Las Vegas-Henderson-Paradise, NV", &["NV"]),
    metro(12420, "Austin-Round Rock-Georgetown, TX", &["TX"]),
    metro(17140, "Cincinnati, OH-KY-IN", &["OH", "KY", "IN"]),
    metro(28140, "Kansas City, MO-KS", &["MO", "KS"]),
    metro(18140, "Columbus, OH", &["OH"]),
    metro(26900, "Indianapolis-Carmel-Anderson, IN", &["IN"]),
    metro(17460, "Cleveland-Elyria, OH", &["OH"]),
    metro(41940, "San Jose-Sunnyvale-Santa Clara, CA", &["CA"]),
    metro(34980, "Nashville-Davidson--Murfreesboro--Franklin, TN", &["TN"]),
    metro(47260, "Virginia Beach-Norfolk-Newport News, VA-NC", &["VA", "NC"]),
    metro(39300, "Providence-Warwick, RI-MA", &["RI", "MA"]),
    metro(27260, "Jacksonville, FL", &["FL"]),
    metro(33340, "Milwaukee-Waukesha, WI", &["WI"]),
    metro(36420, "Oklahoma City, OK", &["OK"]),
    metro(40060, "Richmond, VA", &["VA"]),
    metro(39580, "Raleigh-Cary, NC", &["NC"]),
    metro(32820, "Memphis, TN-MS-AR", &["TN", "MS", "AR"]),
    metro(31140, "Louisville/Jefferson County, KY-IN", &["KY", "IN"]),
    metro(41620, "Salt Lake City, UT", &["UT"]),
    metro(35380, "New Orleans-Metairie, LA", &["LA"]),
    metro(25540, "Hartford-East Hartford-Middletown, CT", &["CT"]),
    metro(15380, "Buffalo-Cheektowaga, NY", &["NY"]),
    metro(13820, "Birmingham-Hoover, AL", &["AL"]),
];

/// Look up a curated metro by id
pub fn find_curated_metro(id: u32) -> Option<&'static CuratedMetro> {
    CURATED_METROS.iter().find(|m| m.id == id)
}
