use storefront_config::Config;
use storefront_core_contact_impl::{ContactFeatureConfig, ContactFormFeatureServiceImpl};
use storefront_download_impl::DownloadServiceImpl;
use storefront_shared_impl::time::TimeServiceImpl;

pub type ContactFeature = ContactFormFeatureServiceImpl<TimeServiceImpl, DownloadServiceImpl>;

/// Builds the contact form controller, saving submissions into the configured
/// download directory.
pub fn contact_feature(config: &Config) -> ContactFeature {
    ContactFormFeatureServiceImpl::new(
        TimeServiceImpl,
        DownloadServiceImpl::new(&config.download.directory),
        ContactFeatureConfig {
            success_message_ttl: config.contact.success_message_ttl.into(),
        },
    )
}
