//! CLI command for inspecting the profile catalog.

use ldsmith_profiles::ProfileRegistry;

/// List the catalog, or print one profile's full rule set.
pub fn run(type_name: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ProfileRegistry::builtin()?;

    if let Some(name) = type_name {
        let profile = registry.lookup(&name)?;
        println!("{}", serde_json::to_string_pretty(&*profile)?);
        return Ok(());
    }

    let mut profiles: Vec<_> = registry.iter().collect();
    profiles.sort_by(|a, b| a.type_name.cmp(&b.type_name));

    println!("Profile catalog ({} profiles):\n", registry.len());
    for p in profiles {
        println!(
            "  {} ({}) — required: {}, recommended: {}, optional: {}",
            p.type_name,
            p.category,
            p.required.len(),
            p.recommended.len(),
            p.optional.len()
        );
        if !p.description.is_empty() {
            println!("     {}", p.description);
        }
        println!("     {}", p.profile_url);
    }
    Ok(())
}
