/// Use cases module containing application business logic orchestration
mod build_installer_image;
mod fetch_ipsw;
mod find_bundle_pkgs;
mod make_boot_volume;
mod mount_guard;
mod resolve_products;
mod select_product;

pub use build_installer_image::{find_installer_app, BuildInstallerImageUseCase, SEED_PROGRAM_XATTR};
pub use fetch_ipsw::FetchIpswUseCase;
pub use find_bundle_pkgs::{is_bundle_style, FindBundlePkgsUseCase};
pub use make_boot_volume::MakeBootVolumeUseCase;
pub use mount_guard::MountGuard;
pub use resolve_products::ResolveProductsUseCase;
pub use select_product::{parse_menu_choice, SelectProductUseCase};
