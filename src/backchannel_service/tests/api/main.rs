mod backchannel_logout;
mod helpers;
