use paint_splash::init_config::SplashConfigFile;

fn main() {
    println!("=== Splash Configuration Verification ===");

    let file = match SplashConfigFile::load_default() {
        Ok(file) => file,
        Err(e) => {
            println!("❌ Could not load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let splash = &file.splash;

    println!("Splash parameters:");
    println!("  particles_per_splash: {}", splash.particles_per_splash);
    println!("  splash_decay: {} (~{:.0} frames)", splash.splash_decay, 1.0 / splash.splash_decay);
    println!("  particle decay: [{}, {})", splash.particle_decay_min, splash.particle_decay_max);
    println!("  speed: [{}, {})", splash.speed_min, splash.speed_max);
    println!("  gravity: {}", splash.gravity);
    println!("  particle_radius: {}", splash.particle_radius);
    println!("  default_color: {}", splash.default_color);
    match splash.max_active_splashes {
        Some(max) => println!("  max_active_splashes: {} ({:?})", max, splash.overflow_policy),
        None => println!("  max_active_splashes: unbounded"),
    }

    // A particle can outlive its splash only if its slowest decay is slower than the splash timer.
    if splash.particle_decay_min < splash.splash_decay {
        println!("⚠️  Slow particles are cut off when their splash expires");
    } else {
        println!("✅ Particles fade out before their splash expires");
    }

    println!("\nTriggers:");
    println!("  click: {} (excluding {:?})", file.triggers.click_splashes, file.triggers.click_excluded_selectors);
    println!("  scroll: {} ({} ms debounce)", file.triggers.scroll_splashes, file.triggers.scroll_debounce_ms);
    println!("  load: {} ({} ms delay)", file.triggers.load_splash, file.triggers.load_splash_delay_ms);
    println!("  card hover: {} ({:?})", file.triggers.card_hover_splashes, file.triggers.card_selector);
    println!("  hover: {} ({} ms throttle)", file.triggers.hover_splashes, file.triggers.hover_throttle_ms);

    println!("\n=== Configuration check completed ===");
}
